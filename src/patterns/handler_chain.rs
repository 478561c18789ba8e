//! HandlerChain exercise
//!
//! Messages are offered to each handler on a chain in turn until one of
//! them claims it. The chain is shared and guarded by a mutex; dispatch
//! copies the handler list under the lock and walks the copy with the lock
//! released, so handlers may add, remove or send while being dispatched to.

use std::fmt;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use crate::core::config::ExerciseConfig;
use crate::core::error::ExerciseError;
use crate::core::transcript::Transcript;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageType {
    ButtonDown,
    ButtonUp,
    Close,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MessagePosition {
    pub x: i32,
    pub y: i32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Message {
    pub message_type: MessageType,
    pub position: MessagePosition,
}

impl Message {
    pub fn new(message_type: MessageType, x: i32, y: i32) -> Self {
        Self {
            message_type,
            position: MessagePosition { x, y },
        }
    }
}

/// What the chain should do after a handler saw a message
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageOutcome {
    /// Not claimed; offer to the next handler
    Continue,
    /// Claimed; stop dispatching
    Stop,
    /// Claimed; send a follow-up message through the chain
    Send(Message),
    /// Claimed; take this handler off the chain
    Remove,
}

pub trait MessageHandler: fmt::Display {
    fn id(&self) -> usize;
    fn process_message(&mut self, message: &Message, out: &mut Transcript) -> MessageOutcome;
}

pub type SharedHandler = Arc<Mutex<dyn MessageHandler + Send>>;

/// Ordered list of message handlers
pub struct HandlerChain {
    handlers: Mutex<Vec<SharedHandler>>,
    next_id: AtomicUsize,
}

impl Default for HandlerChain {
    fn default() -> Self {
        Self::new()
    }
}

impl HandlerChain {
    pub fn new() -> Self {
        Self {
            handlers: Mutex::new(Vec::new()),
            next_id: AtomicUsize::new(1),
        }
    }

    /// Allocate an id for a new handler on this chain
    pub fn next_id(&self) -> usize {
        self.next_id.fetch_add(1, Ordering::Relaxed)
    }

    fn snapshot(&self) -> Vec<SharedHandler> {
        self.handlers
            .lock()
            .expect("handler chain mutex poisoned")
            .clone()
    }

    /// Add a handler unless one with the same id is already present
    pub fn add_handler(&self, handler: SharedHandler) {
        let id = handler.lock().expect("message handler mutex poisoned").id();
        let mut handlers = self.handlers.lock().expect("handler chain mutex poisoned");
        let present = handlers
            .iter()
            .any(|h| h.lock().expect("message handler mutex poisoned").id() == id);
        if !present {
            handlers.push(handler);
        }
    }

    pub fn remove_handler(&self, id: usize) {
        let mut handlers = self.handlers.lock().expect("handler chain mutex poisoned");
        handlers.retain(|h| h.lock().expect("message handler mutex poisoned").id() != id);
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.handlers.lock().expect("handler chain mutex poisoned").len()
    }

    /// Offer a message to each handler until one claims it
    pub fn send_message(&self, message: &Message, out: &mut Transcript) {
        for handler in self.snapshot() {
            let (id, outcome) = {
                let mut handler = handler.lock().expect("message handler mutex poisoned");
                (handler.id(), handler.process_message(message, out))
            };
            match outcome {
                MessageOutcome::Continue => continue,
                MessageOutcome::Stop => break,
                MessageOutcome::Send(follow_up) => {
                    self.send_message(&follow_up, out);
                    break;
                }
                MessageOutcome::Remove => {
                    log::debug!("removing handler {} from chain", id);
                    self.remove_handler(id);
                    break;
                }
            }
        }
    }
}

impl fmt::Display for HandlerChain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for handler in self.snapshot() {
            let handler = handler.lock().expect("message handler mutex poisoned");
            writeln!(f, "    {}", handler)?;
        }
        Ok(())
    }
}

/// Axis aligned rectangle, right and bottom edges exclusive
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WindowRectangle {
    pub left: i32,
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
}

impl WindowRectangle {
    const MINIMUM_WIDTH: i32 = 4;
    const MINIMUM_HEIGHT: i32 = 4;

    pub fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            left: x,
            top: y,
            right: x + width.max(Self::MINIMUM_WIDTH),
            bottom: y + height.max(Self::MINIMUM_HEIGHT),
        }
    }

    pub fn contains(&self, point: MessagePosition) -> bool {
        point.x >= self.left && point.x < self.right && point.y >= self.top && point.y < self.bottom
    }
}

impl fmt::Display for WindowRectangle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "x1={:2}, y1={:2}, x2={:2}, y2={:2}",
            self.left, self.top, self.right, self.bottom
        )
    }
}

/// A window with a close box in its top right corner
pub struct MessageWindow {
    id: usize,
    title: String,
    window_box: WindowRectangle,
    close_box: WindowRectangle,
    selected: bool,
}

impl MessageWindow {
    const CLOSE_WIDTH: i32 = 2;
    const CLOSE_HEIGHT: i32 = 2;

    pub fn new(id: usize, title: &str, x: i32, y: i32, width: i32, height: i32) -> Self {
        let window_box = WindowRectangle::new(x, y, width, height);
        // the close box is smaller than the minimum, so build it directly
        let close_box = WindowRectangle {
            left: window_box.right - Self::CLOSE_WIDTH,
            top: window_box.top,
            right: window_box.right,
            bottom: window_box.top + Self::CLOSE_HEIGHT,
        };
        Self {
            id,
            title: title.to_string(),
            window_box,
            close_box,
            selected: false,
        }
    }

    /// Create a window and put it on the chain
    pub fn create(chain: &HandlerChain, title: &str, x: i32, y: i32, width: i32, height: i32) -> SharedHandler {
        let window: SharedHandler = Arc::new(Mutex::new(Self::new(
            chain.next_id(),
            title,
            x,
            y,
            width,
            height,
        )));
        chain.add_handler(Arc::clone(&window));
        window
    }

    fn handle_button_down(&mut self, message: &Message, out: &mut Transcript) -> MessageOutcome {
        if self.window_box.contains(message.position) {
            if !self.selected {
                self.selected = true;
                out.line(format!("  --> Button Down in \"{}\", window selected", self.title));
            }
        } else if self.selected {
            self.selected = false;
            out.line(format!(
                "  --> Button Down not in \"{}\", window deselected",
                self.title
            ));
        }
        MessageOutcome::Continue
    }

    fn handle_button_up(&mut self, message: &Message, out: &mut Transcript) -> MessageOutcome {
        if !self.selected || !self.window_box.contains(message.position) {
            return MessageOutcome::Continue;
        }
        if self.close_box.contains(message.position) {
            out.line(format!(
                "  --> Button Up in \"{}\" close box, sending Close message",
                self.title
            ));
            MessageOutcome::Send(Message {
                message_type: MessageType::Close,
                position: message.position,
            })
        } else {
            out.line(format!(
                "  --> Button Up in \"{}\", no further action taken",
                self.title
            ));
            MessageOutcome::Stop
        }
    }

    fn handle_close(&mut self, out: &mut Transcript) -> MessageOutcome {
        if self.selected {
            out.line(format!(
                "  --> Close in \"{}\", removing window from handler chain",
                self.title
            ));
            self.selected = false;
            MessageOutcome::Remove
        } else {
            out.line(format!(
                "  --> Close seen in \"{}\" but this window is not selected, ignoring",
                self.title
            ));
            MessageOutcome::Continue
        }
    }
}

impl MessageHandler for MessageWindow {
    fn id(&self) -> usize {
        self.id
    }

    fn process_message(&mut self, message: &Message, out: &mut Transcript) -> MessageOutcome {
        match message.message_type {
            MessageType::ButtonDown => self.handle_button_down(message, out),
            MessageType::ButtonUp => self.handle_button_up(message, out),
            MessageType::Close => self.handle_close(out),
        }
    }
}

impl fmt::Display for MessageWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[id={:2}] \"{}\" ({}), selected={}",
            self.id, self.title, self.window_box, self.selected
        )
    }
}

fn click(chain: &HandlerChain, x: i32, y: i32, out: &mut Transcript) {
    chain.send_message(&Message::new(MessageType::ButtonDown, x, y), out);
    chain.send_message(&Message::new(MessageType::ButtonUp, x, y), out);
}

pub fn run(_config: &ExerciseConfig, out: &mut Transcript) -> Result<(), ExerciseError> {
    let chain = HandlerChain::new();
    MessageWindow::create(&chain, "Window 1", 0, 0, 10, 10);
    MessageWindow::create(&chain, "Window 2", 20, 0, 5, 5);
    MessageWindow::create(&chain, "Window 3", 30, 10, 15, 15);

    out.line("  Handler Chain at start:");
    out.line(chain.to_string());

    let steps = [
        ("  Select Window 2", 22, 1),
        ("  Select Window 3", 35, 11),
        ("  Select Window 1", 4, 4),
        ("  Close Window 2", 24, 0),
    ];
    for (label, x, y) in steps {
        out.line(label);
        click(&chain, x, y, out);
        out.line("  Current handler chain:");
        out.line(chain.to_string());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_window_rectangle_minimum_and_bounds() {
        let rect = WindowRectangle::new(5, 5, 1, 1);
        assert_eq!(rect.right, 9);
        assert_eq!(rect.bottom, 9);
        assert!(rect.contains(MessagePosition { x: 5, y: 8 }));
        assert!(!rect.contains(MessagePosition { x: 9, y: 5 }));
    }

    #[test]
    fn test_ids_come_from_the_chain() {
        let first = HandlerChain::new();
        let second = HandlerChain::new();
        let a = MessageWindow::create(&first, "a", 0, 0, 4, 4);
        let b = MessageWindow::create(&second, "b", 0, 0, 4, 4);
        assert_eq!(a.lock().unwrap().id(), 1);
        assert_eq!(b.lock().unwrap().id(), 1);
    }

    #[test]
    fn test_duplicate_add_ignored() {
        let chain = HandlerChain::new();
        let window = MessageWindow::create(&chain, "a", 0, 0, 4, 4);
        chain.add_handler(window);
        assert_eq!(chain.len(), 1);
    }

    #[test]
    fn test_close_box_removes_selected_window() {
        let chain = HandlerChain::new();
        MessageWindow::create(&chain, "a", 0, 0, 10, 10);
        MessageWindow::create(&chain, "b", 20, 0, 10, 10);
        let mut out = Transcript::new();
        click(&chain, 28, 1, &mut out);
        assert_eq!(chain.len(), 1);
        assert_eq!(
            out.into_lines(),
            vec![
                "  --> Button Down in \"b\", window selected",
                "  --> Button Up in \"b\" close box, sending Close message",
                "  --> Close seen in \"a\" but this window is not selected, ignoring",
                "  --> Close in \"b\", removing window from handler chain",
            ]
        );
    }

    #[test]
    fn test_exercise_final_chain() {
        let mut out = Transcript::new();
        run(&ExerciseConfig::default(), &mut out).unwrap();
        let lines = out.into_lines();
        assert_eq!(
            lines[1],
            "    [id= 1] \"Window 1\" (x1= 0, y1= 0, x2=10, y2=10), selected=false"
        );
        let tail = &lines[lines.len() - 4..];
        assert_eq!(
            tail,
            [
                "  Current handler chain:",
                "    [id= 1] \"Window 1\" (x1= 0, y1= 0, x2=10, y2=10), selected=false",
                "    [id= 3] \"Window 3\" (x1=30, y1=10, x2=45, y2=25), selected=false",
                "",
            ]
        );
        assert!(lines.contains(&"  --> Close in \"Window 2\", removing window from handler chain".to_string()));
    }
}
