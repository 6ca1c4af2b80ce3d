pub mod app;
pub mod audio;
pub mod graph_algorithms;
pub mod pathfinding_algorithms;
pub mod sequence;
pub mod sorting_algorithms;

use std::io::{stdout, Write};
use std::time::Duration;

use crossterm::{
    cursor,
    event::{self, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{self, EnterAlternateScreen, LeaveAlternateScreen},
};

use app::{App, FrameInput};
use audio::AudioPlayer;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Audio is best-effort: no output device just means a silent run.
    let player = AudioPlayer::new().ok();
    let mut live = player.as_ref().map(|p| p.spawn());
    let sender = live.as_ref().map(|(tx, _)| tx.clone());

    let mut app = App::new(sender)?;

    terminal::enable_raw_mode()?;
    execute!(stdout(), EnterAlternateScreen, cursor::Hide)?;

    let result = run(&mut app);

    execute!(stdout(), cursor::Show, LeaveAlternateScreen)?;
    terminal::disable_raw_mode()?;

    if let Some((_, handle)) = live.take() {
        handle.thread().unpark();
        let _ = handle.join();
    }
    result
}

fn run(app: &mut App) -> Result<(), Box<dyn std::error::Error>> {
    loop {
        let mut input = FrameInput::default();
        while event::poll(Duration::from_millis(0))? {
            if let Event::Key(key_event) = event::read()? {
                if key_event.kind == KeyEventKind::Press {
                    if key_event.code == KeyCode::Esc || key_event.code == KeyCode::Char('q') {
                        return Ok(());
                    }
                    // Last press this frame wins; the snapshot is one key.
                    input.key = Some(key_event.code);
                }
            }
        }

        app.tick(&input);

        // Raw mode does not translate newlines.
        let frame = app.render().replace('\n', "\r\n");
        let mut out = stdout();
        out.write_all(frame.as_bytes())?;
        out.flush()?;

        std::thread::sleep(Duration::from_millis(app.frame_millis()));
    }
}
