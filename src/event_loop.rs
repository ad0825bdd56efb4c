use std::io;
use std::time::Duration;

use crossterm::event::Event;

use crate::drivers::InputDriver;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlFlow {
    Continue,
    Quit,
}

/// The single UI loop of the store.
///
/// Everything happens on this thread: key events, overlay timers and
/// drawing. The handler runs with `None` once per poll interval so timers
/// advance and a frame is drawn even when no key is pressed, and with
/// `Some(event)` for each input event.
pub struct EventLoop<D> {
    driver: D,
    poll_interval: Duration,
}

impl<D: InputDriver> EventLoop<D> {
    pub fn new(driver: D, poll_interval: Duration) -> Self {
        Self {
            driver,
            poll_interval,
        }
    }

    pub fn driver(&mut self) -> &mut D {
        &mut self.driver
    }

    pub fn run<F>(&mut self, mut handler: F) -> io::Result<()>
    where
        F: FnMut(Option<Event>) -> io::Result<ControlFlow>,
    {
        loop {
            if let ControlFlow::Quit = handler(None)? {
                break;
            }

            if self.driver.poll(self.poll_interval)? {
                // Drain bursts (pasted text, key repeat) before the next frame
                // so typing never lags behind the display.
                loop {
                    let event = self.driver.read()?;
                    if let ControlFlow::Quit = handler(Some(event))? {
                        return Ok(());
                    }
                    if !self.driver.poll(Duration::from_millis(0))? {
                        break;
                    }
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
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

    fn key(c: char) -> Event {
        Event::Key(KeyEvent::new(KeyCode::Char(c), KeyModifiers::NONE))
    }

    #[test]
    fn drains_burst_then_ticks() {
        let driver = Scripted(VecDeque::from(vec![key('a'), key('b'), key('q')]));
        let mut event_loop = EventLoop::new(driver, Duration::from_millis(1));
        let mut seen = Vec::new();
        event_loop
            .run(|event| {
                seen.push(event.clone());
                Ok(match event {
                    Some(Event::Key(k)) if k.code == KeyCode::Char('q') => ControlFlow::Quit,
                    _ => ControlFlow::Continue,
                })
            })
            .unwrap();
        assert_eq!(seen.len(), 4);
        assert!(seen[0].is_none());
        assert_eq!(seen[3], Some(key('q')));
    }
}
