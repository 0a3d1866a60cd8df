//! Persistent move lists for frontier entries.
//!
//! Sibling entries in a frontier share their common prefix: extending a trail
//! allocates one link and leaves the original untouched, so no entry ever
//! observes another entry's extension.
use crate::engine::{Move, Path};
use std::rc::Rc;

struct Link {
    mv: Move,
    prev: Trail,
    len: usize,
}

#[derive(Clone, Default)]
pub struct Trail(Option<Rc<Link>>);

impl Trail {
    /// Returns a new trail with `mv` appended.
    pub fn extend(&self, mv: Move) -> Trail {
        Trail(Some(Rc::new(Link {
            mv,
            prev: self.clone(),
            len: self.len() + 1,
        })))
    }

    pub fn len(&self) -> usize {
        self.0.as_ref().map_or(0, |link| link.len)
    }

    /// Materializes the trail as a start-to-end `Path`.
    pub fn to_path(&self) -> Path {
        let mut moves = Vec::with_capacity(self.len());
        let mut cursor = self.0.as_deref();
        while let Some(link) = cursor {
            moves.push(link.mv);
            cursor = link.prev.0.as_deref();
        }
        moves.reverse();
        Path::from(moves)
    }
}

impl Drop for Trail {
    // Unlink iteratively; depth-first trails can be far longer than the stack.
    fn drop(&mut self) {
        let mut next = self.0.take();
        while let Some(rc) = next {
            match Rc::try_unwrap(rc) {
                Ok(mut link) => next = link.prev.0.take(),
                Err(_) => break,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trail_shares_prefix() {
        let root = Trail::default();
        let left = root.extend(Move::Left);
        let up = left.extend(Move::Up);
        let down = left.extend(Move::Down);
        assert_eq!(root.len(), 0);
        assert_eq!(left.to_path().to_string(), "L");
        assert_eq!(up.to_path().to_string(), "LU");
        assert_eq!(down.to_path().to_string(), "LD");
        drop(left);
        assert_eq!(up.len(), 2);
        assert_eq!(down.to_path().to_string(), "LD");
    }

    #[test]
    fn test_long_trail_drops_without_overflow() {
        let mut trail = Trail::default();
        for i in 0..1_000_000 {
            trail = trail.extend(if i % 2 == 0 { Move::Left } else { Move::Right });
        }
        assert_eq!(trail.len(), 1_000_000);
        drop(trail);
    }
}
