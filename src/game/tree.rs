use anyhow::{ensure, Result};
use log::debug;
use serde::Deserialize;

/// Index of a room inside its [`RoomTree`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RoomId(usize);

/// Which child slot of a room a passage leads to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Left,
    Right,
}

impl std::fmt::Display for Side {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Side::Left => write!(f, "left"),
            Side::Right => write!(f, "right"),
        }
    }
}

/// A single room of the mansion.
#[derive(Debug, Clone)]
pub struct Room {
    pub name: String,
    /// The clue lying in this room, if any. Never `Some("")`.
    pub clue: Option<String>,
    left: Option<RoomId>,
    right: Option<RoomId>,
}

impl Room {
    pub fn child(&self, side: Side) -> Option<RoomId> {
        match side {
            Side::Left => self.left,
            Side::Right => self.right,
        }
    }

    pub fn is_leaf(&self) -> bool {
        self.left.is_none() && self.right.is_none()
    }
}

/// Collects rooms and passages, then freezes them into a [`RoomTree`].
#[derive(Debug, Default)]
pub struct RoomTreeBuilder {
    rooms: Vec<Room>,
    attached: Vec<bool>,
}

impl RoomTreeBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a detached leaf room. An empty clue means the room holds none.
    pub fn build_room(&mut self, name: impl Into<String>, clue: Option<&str>) -> RoomId {
        let id = RoomId(self.rooms.len());
        self.rooms.push(Room {
            name: name.into(),
            clue: clue.filter(|c| !c.is_empty()).map(str::to_owned),
            left: None,
            right: None,
        });
        self.attached.push(false);
        id
    }

    /// Attach `child` below `parent`. A room can only ever have one parent.
    pub fn connect(&mut self, parent: RoomId, side: Side, child: RoomId) -> Result<()> {
        ensure!(
            parent.0 < self.rooms.len() && child.0 < self.rooms.len(),
            "unknown room in passage {:?} -> {:?}",
            parent,
            child
        );
        ensure!(parent != child, "room '{}' cannot lead to itself", self.rooms[parent.0].name);
        ensure!(
            !self.attached[child.0],
            "room '{}' already has a parent",
            self.rooms[child.0].name
        );

        let parent_room = &mut self.rooms[parent.0];
        let slot = match side {
            Side::Left => &mut parent_room.left,
            Side::Right => &mut parent_room.right,
        };
        ensure!(
            slot.is_none(),
            "the {side} passage of '{}' is already taken",
            parent_room.name
        );
        *slot = Some(child);
        self.attached[child.0] = true;

        debug!(
            "Connected {} -[{side}]-> {}",
            self.rooms[parent.0].name, self.rooms[child.0].name
        );
        Ok(())
    }

    /// Freeze the rooms into a tree rooted at `root`. Every room must be
    /// reachable from the root, which also rules out cycles.
    pub fn finish(self, root: RoomId) -> Result<RoomTree> {
        ensure!(root.0 < self.rooms.len(), "unknown root room {:?}", root);
        ensure!(
            !self.attached[root.0],
            "root room '{}' is the child of another room",
            self.rooms[root.0].name
        );

        let mut reached = 0;
        let mut pending = vec![root];
        while let Some(id) = pending.pop() {
            reached += 1;
            let room = &self.rooms[id.0];
            pending.extend(room.left);
            pending.extend(room.right);
        }
        ensure!(
            reached == self.rooms.len(),
            "{} room(s) cannot be reached from '{}'",
            self.rooms.len() - reached,
            self.rooms[root.0].name
        );

        Ok(RoomTree {
            rooms: self.rooms,
            root,
        })
    }
}

/// The mansion map. Immutable once built.
#[derive(Debug, Clone)]
pub struct RoomTree {
    rooms: Vec<Room>,
    root: RoomId,
}

impl RoomTree {
    pub fn root(&self) -> RoomId {
        self.root
    }

    pub fn room(&self, id: RoomId) -> &Room {
        &self.rooms[id.0]
    }

    pub fn child(&self, id: RoomId, side: Side) -> Option<RoomId> {
        self.room(id).child(side)
    }

    pub fn is_leaf(&self, id: RoomId) -> bool {
        self.room(id).is_leaf()
    }

    pub fn len(&self) -> usize {
        self.rooms.len()
    }
}
