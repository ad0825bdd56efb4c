use std::io;
use std::time::{Duration, Instant};

use crossterm::event::{Event, KeyEventKind};
use tracing::debug;

use crate::drivers::{InputDriver, OutputDriver};
use crate::event_loop::{ControlFlow, EventLoop};
use crate::overlay::NavigationHost;
use crate::storefront::Storefront;
use crate::view;

/// Run the storefront until the user quits.
///
/// The clock handed to [`Storefront::tick`] is the time since this call
/// started, so overlay hides and copy feedback resets fire on schedule
/// whether or not keys are arriving.
pub fn run_storefront<D, O, H>(
    driver: D,
    output: &mut O,
    app: &mut Storefront<H>,
    poll_interval: Duration,
) -> io::Result<()>
where
    D: InputDriver,
    O: OutputDriver,
    H: NavigationHost,
{
    let start = Instant::now();
    let mut event_loop = EventLoop::new(driver, poll_interval);
    event_loop.run(|event| {
        app.tick(start.elapsed());
        match event {
            Some(Event::Key(key)) if key.kind != KeyEventKind::Release => {
                app.handle_key(key);
                app.tick(start.elapsed());
            }
            Some(Event::Resize(width, height)) => {
                debug!(width, height, "terminal resized");
            }
            Some(_) => {}
            None => {
                let app: &Storefront<H> = app;
                output.draw(|mut frame| view::draw(&mut frame, app))?;
            }
        }
        Ok(if app.should_quit() {
            ControlFlow::Quit
        } else {
            ControlFlow::Continue
        })
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{BundledCatalog, Catalog};
    use crate::config::StoreConfig;
    use crate::overlay::SessionHistory;
    use crate::prefs::PreferenceStore;
    use crate::ui::UiFrame;
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
    use ratatui::buffer::Buffer;
    use ratatui::layout::Rect;
    use std::collections::VecDeque;

    struct Scripted(VecDeque<Event>);

    impl InputDriver for Scripted {
        fn poll(&mut self, _timeout: Duration) -> io::Result<bool> {
            Ok(!self.0.is_empty())
        }

        fn read(&mut self) -> io::Result<Event> {
            self.0
                .pop_front()
                .ok_or_else(|| io::Error::other("script exhausted"))
        }
    }

    #[derive(Default)]
    struct Headless {
        frames: usize,
    }

    impl OutputDriver for Headless {
        fn enter(&mut self) -> io::Result<()> {
            Ok(())
        }

        fn exit(&mut self) -> io::Result<()> {
            Ok(())
        }

        fn draw<F>(&mut self, f: F) -> io::Result<()>
        where
            F: FnOnce(UiFrame<'_>),
        {
            let area = Rect::new(0, 0, 80, 24);
            let mut buffer = Buffer::empty(area);
            f(UiFrame::from_parts(area, &mut buffer));
            self.frames += 1;
            Ok(())
        }
    }

    #[test]
    fn quits_on_ctrl_q_after_drawing() {
        let (catalog, _) = Catalog::load_from(&BundledCatalog);
        let mut app = Storefront::new(
            catalog,
            &StoreConfig::default(),
            PreferenceStore::in_memory(),
            SessionHistory::new(),
        );
        let script = VecDeque::from(vec![
            Event::Key(KeyEvent::new(KeyCode::Down, KeyModifiers::NONE)),
            Event::Key(KeyEvent::new(KeyCode::Char('q'), KeyModifiers::CONTROL)),
        ]);
        let mut output = Headless::default();
        run_storefront(Scripted(script), &mut output, &mut app, Duration::from_millis(1)).unwrap();
        assert!(app.should_quit());
        assert_eq!(output.frames, 1);
        assert_eq!(app.home().cursor, 1);
    }
}
