use anyhow::Result;
use crossterm::event::{
    self, DisableFocusChange, DisableMouseCapture, EnableFocusChange, EnableMouseCapture, Event,
    KeyCode, KeyEventKind, MouseEventKind,
};
use crossterm::execute;
use gridglobe::app::App;
use gridglobe::ui;
use ratatui::DefaultTerminal;
use std::time::Duration;

fn main() -> Result<()> {
    // Initialize terminal
    let mut terminal = ratatui::init();
    terminal.clear()?;

    // Focus events drive the visibility signal; mouse moves drive the
    // starfield parallax
    execute!(std::io::stdout(), EnableMouseCapture, EnableFocusChange)?;

    // Run the app
    let result = run(&mut terminal);

    // Restore terminal
    let _ = execute!(std::io::stdout(), DisableMouseCapture, DisableFocusChange);
    ratatui::restore();

    result
}

fn run(terminal: &mut DefaultTerminal) -> Result<()> {
    let size = terminal.size()?;
    let mut app = App::new(size.width as usize, size.height as usize);

    // Main loop, ~60fps
    loop {
        app.frame();

        terminal.draw(|frame| ui::render(frame, &app))?;

        if event::poll(Duration::from_millis(16))? {
            match event::read()? {
                Event::Key(key) => {
                    // Only handle key press events (not release)
                    if key.kind == KeyEventKind::Press {
                        match key.code {
                            KeyCode::Char('q') | KeyCode::Esc => app.quit(),

                            // Simulate the globe scrolling off-screen
                            KeyCode::Char(' ') => app.toggle_offscreen(),

                            // Background layer toggle
                            KeyCode::Char('s') | KeyCode::Char('S') => app.toggle_starfield(),

                            // City label overlay
                            KeyCode::Char('l') | KeyCode::Char('L') => app.toggle_labels(),

                            _ => {}
                        }
                    }
                }
                Event::Mouse(mouse) => {
                    if matches!(
                        mouse.kind,
                        MouseEventKind::Moved | MouseEventKind::Drag(_)
                    ) {
                        app.set_pointer(mouse.column, mouse.row);
                    }
                }
                Event::Resize(width, height) => {
                    app.resize(width as usize, height as usize);
                }
                Event::FocusGained => app.set_focus(true),
                Event::FocusLost => app.set_focus(false),
                _ => {}
            }
        }

        if app.should_quit {
            break;
        }
    }

    Ok(())
}
