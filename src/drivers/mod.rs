pub mod console;
pub mod keyboard;

use ::crossterm::event::Event;
use std::io;
use std::time::Duration;

use crate::ui::UiFrame;

pub trait InputDriver {
    fn poll(&mut self, timeout: Duration) -> io::Result<bool>;
    fn read(&mut self) -> io::Result<Event>;
}

impl<T: InputDriver + ?Sized> InputDriver for &mut T {
    fn poll(&mut self, timeout: Duration) -> io::Result<bool> {
        (**self).poll(timeout)
    }

    fn read(&mut self) -> io::Result<Event> {
        (**self).read()
    }
}

pub trait OutputDriver {
    fn enter(&mut self) -> io::Result<()>;
    fn exit(&mut self) -> io::Result<()>;

    fn draw<F>(&mut self, f: F) -> io::Result<()>
    where
        F: FnOnce(UiFrame<'_>);
}

#[cfg(test)]
mod tests {
    use super::*;
    use ::crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

    struct Dummy;
    impl InputDriver for Dummy {
        fn poll(&mut self, _timeout: Duration) -> io::Result<bool> {
            Ok(true)
        }

        fn read(&mut self) -> io::Result<Event> {
            Ok(Event::Key(KeyEvent::new(KeyCode::Char('x'), KeyModifiers::NONE)))
        }
    }

    fn read_one<D: InputDriver>(mut driver: D) -> Event {
        assert!(driver.poll(Duration::from_millis(0)).unwrap());
        driver.read().unwrap()
    }

    #[test]
    fn blanket_impl_for_mut_ref_works() {
        let mut d = Dummy;
        let Event::Key(k) = read_one(&mut d) else {
            panic!("expected key");
        };
        assert_eq!(k.code, KeyCode::Char('x'));
    }
}
