//! Tile content and the factory capability the board draws it from.
//!
//! The board never constructs content itself. It asks a [`ContentFactory`]
//! for a handle of the wanted [`ContentType`] and hands the old handle back
//! through [`ContentFactory::release`] exactly once when it is replaced.
//! [`ContentPool`] is the default factory and recycles released handles.

use serde::{Deserialize, Serialize};

/// What occupies a cell.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ContentType {
    #[default]
    Empty,
    Wall,
    Destination,
}

impl ContentType {
    pub const ALL: [ContentType; 3] = [
        ContentType::Empty,
        ContentType::Wall,
        ContentType::Destination,
    ];

    /// Character used in the text layout format
    pub fn symbol(self) -> char {
        match self {
            ContentType::Empty => '.',
            ContentType::Wall => '#',
            ContentType::Destination => 'D',
        }
    }

    pub fn from_symbol(symbol: char) -> Option<ContentType> {
        match symbol {
            '.' => Some(ContentType::Empty),
            '#' => Some(ContentType::Wall),
            'D' => Some(ContentType::Destination),
            _ => None,
        }
    }

    fn slot(self) -> usize {
        match self {
            ContentType::Empty => 0,
            ContentType::Wall => 1,
            ContentType::Destination => 2,
        }
    }
}

/// A content handle owned by a cell.
pub trait TileContent {
    fn content_type(&self) -> ContentType;
}

/// Source of content handles.
pub trait ContentFactory {
    type Content: TileContent;

    /// Produce a handle carrying `kind`.
    fn get(&mut self, kind: ContentType) -> Self::Content;

    /// Take back a handle that a cell no longer holds.
    fn release(&mut self, content: Self::Content);
}

/// Content handle handed out by [`ContentPool`].
#[derive(Debug, PartialEq, Eq)]
pub struct PooledContent {
    kind: ContentType,
    serial: u64,
}

impl PooledContent {
    /// Creation number, stable while the handle is recycled
    pub fn serial(&self) -> u64 {
        self.serial
    }
}

impl TileContent for PooledContent {
    fn content_type(&self) -> ContentType {
        self.kind
    }
}

/// Factory that keeps released handles per content type and hands them out again.
#[derive(Debug, Default)]
pub struct ContentPool {
    free: [Vec<PooledContent>; 3],
    created: u64,
    reused: u64,
    released: u64,
}

impl ContentPool {
    pub fn new() -> Self {
        Self::default()
    }

    /// Handles ever constructed
    pub fn created(&self) -> u64 {
        self.created
    }

    /// Handles served from the free lists
    pub fn reused(&self) -> u64 {
        self.reused
    }

    /// Handles currently held outside the pool
    pub fn live(&self) -> u64 {
        self.created + self.reused - self.released
    }

    /// Handles waiting in the free lists
    pub fn pooled(&self) -> usize {
        self.free.iter().map(Vec::len).sum()
    }
}

impl ContentFactory for ContentPool {
    type Content = PooledContent;

    fn get(&mut self, kind: ContentType) -> PooledContent {
        if let Some(content) = self.free[kind.slot()].pop() {
            self.reused += 1;
            return content;
        }
        self.created += 1;
        PooledContent {
            kind,
            serial: self.created,
        }
    }

    fn release(&mut self, content: PooledContent) {
        self.released += 1;
        self.free[content.kind.slot()].push(content);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn symbols_round_trip() {
        for kind in ContentType::ALL {
            assert_eq!(ContentType::from_symbol(kind.symbol()), Some(kind));
        }
        assert_eq!(ContentType::from_symbol('x'), None);
    }

    #[test]
    fn default_is_empty() {
        assert_eq!(ContentType::default(), ContentType::Empty);
    }

    #[test]
    fn pool_recycles_by_type() {
        let mut pool = ContentPool::new();
        let wall = pool.get(ContentType::Wall);
        let serial = wall.serial();
        assert_eq!(pool.live(), 1);

        pool.release(wall);
        assert_eq!(pool.live(), 0);
        assert_eq!(pool.pooled(), 1);

        // A different type never gets the pooled wall
        let empty = pool.get(ContentType::Empty);
        assert_eq!(empty.content_type(), ContentType::Empty);
        assert_eq!(pool.created(), 2);

        let wall = pool.get(ContentType::Wall);
        assert_eq!(wall.content_type(), ContentType::Wall);
        assert_eq!(wall.serial(), serial);
        assert_eq!(pool.reused(), 1);
        assert_eq!(pool.live(), 2);
        assert_eq!(pool.pooled(), 0);
    }
}
