//! Helpers shared by the unit tests of the prompt widgets.

use std::{
    cell::RefCell,
    io::{self, Write},
    rc::Rc,
};

use super::engine::Console;

/// A writer whose contents stay reachable after it has been moved into an engine.
#[derive(Clone, Default)]
pub struct SharedBuffer(Rc<RefCell<Vec<u8>>>);

impl SharedBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn bytes(&self) -> Vec<u8> {
        self.0.borrow().clone()
    }

    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.0.borrow()).into_owned()
    }
}

impl Write for SharedBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.borrow_mut().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Console stand-in that records the prompt and everything written.
#[derive(Default)]
pub struct RecordingConsole {
    pub prompt: String,
    pub written: Vec<u8>,
}

impl RecordingConsole {
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.written).into_owned()
    }
}

impl Console for RecordingConsole {
    fn set_prompt(&mut self, prompt: &str) {
        prompt.clone_into(&mut self.prompt);
    }

    fn output(&mut self) -> &mut dyn Write {
        &mut self.written
    }
}
