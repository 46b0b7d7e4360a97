//! Generation counter for refresh batches.
//!
//! Every batch takes a [`Ticket`]; starting a newer batch (or leaving the
//! page) retires all older tickets, and results carrying a retired ticket
//! are dropped instead of being applied over newer ones.

use std::{cell::Cell, rc::Rc};

#[derive(Clone, Debug, Default)]
pub struct Generation(Rc<Cell<u64>>);

impl PartialEq for Generation {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl Generation {
    pub fn new() -> Self {
        Self::default()
    }

    /// Retires every outstanding ticket and issues a fresh one.
    pub fn advance(&self) -> Ticket {
        let value = self.0.get() + 1;
        self.0.set(value);
        Ticket {
            generation: self.clone(),
            value,
        }
    }

    pub fn current(&self) -> u64 {
        self.0.get()
    }
}

#[derive(Clone, Debug)]
pub struct Ticket {
    generation: Generation,
    value: u64,
}

impl Ticket {
    pub fn is_current(&self) -> bool {
        self.generation.current() == self.value
    }

    pub fn value(&self) -> u64 {
        self.value
    }
}

#[cfg(test)]
mod tests {
    use super::Generation;

    #[test]
    fn newer_ticket_retires_older() {
        let generation = Generation::new();
        let first = generation.advance();
        assert!(first.is_current());

        let second = generation.advance();

        assert!(!first.is_current());
        assert!(second.is_current());
        assert_eq!(second.value(), 2);
    }

    #[test]
    fn clones_share_the_counter() {
        let generation = Generation::new();
        let ticket = generation.clone().advance();

        generation.advance();

        assert!(!ticket.is_current());
        assert_eq!(generation, generation.clone());
    }
}
