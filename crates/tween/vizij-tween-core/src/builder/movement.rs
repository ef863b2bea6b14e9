use serde::{Deserialize, Serialize};
use tracing::warn;

use super::{read_current, reports_vec2, AnimationBuilder, ShapeBuilder};
use crate::handle::AnimationHandle;
use crate::property::AnimatableProperty;
use crate::value::{Value, Vec3};

/// Which position property a move drives.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MoveSpace {
    #[default]
    World,
    Local,
    Anchored,
}

impl MoveSpace {
    pub fn property(self) -> AnimatableProperty {
        match self {
            MoveSpace::World => AnimatableProperty::Position,
            MoveSpace::Local => AnimatableProperty::LocalPosition,
            MoveSpace::Anchored => AnimatableProperty::AnchoredPosition,
        }
    }
}

/// Position tween. `from` defaults to the target's live position at build
/// time; a missing `to` produces a zero-length move with a warning.
pub struct MoveBuilder {
    base: AnimationBuilder,
    from: Option<Vec3>,
    to: Option<Vec3>,
    space: MoveSpace,
}

impl MoveBuilder {
    pub(crate) fn new(base: AnimationBuilder) -> Self {
        Self {
            base,
            from: None,
            to: None,
            space: MoveSpace::World,
        }
    }

    pub fn from(mut self, position: Vec3) -> Self {
        self.from = Some(position);
        self
    }

    pub fn to(mut self, position: Vec3) -> Self {
        self.to = Some(position);
        self
    }

    pub fn from_current(mut self) -> Self {
        self.from = None;
        self
    }

    pub fn world(mut self) -> Self {
        self.space = MoveSpace::World;
        self
    }

    pub fn local(mut self) -> Self {
        self.space = MoveSpace::Local;
        self
    }

    pub fn anchored(mut self) -> Self {
        self.space = MoveSpace::Anchored;
        self
    }

    pub fn space(mut self, space: MoveSpace) -> Self {
        self.space = space;
        self
    }
}

impl ShapeBuilder for MoveBuilder {
    fn base_mut(&mut self) -> &mut AnimationBuilder {
        &mut self.base
    }

    fn build(self) -> AnimationHandle {
        let property = self.space.property();
        let target = self.base.target_ref().clone();
        let handle = self.base.build();

        let from = match self.from {
            Some(from) => from,
            None => match read_current(&target, property).and_then(|v| v.as_position()) {
                Some(from) => from,
                None => return handle,
            },
        };
        let to = self.to.unwrap_or_else(|| {
            warn!(%property, "move has no destination; using its start position");
            from
        });

        let (from, to) = if reports_vec2(&target, property) {
            (Value::Vec2([from[0], from[1]]), Value::Vec2([to[0], to[1]]))
        } else {
            (Value::Vec3(from), Value::Vec3(to))
        };
        handle.set_property(property, from, to);
        handle
    }
}
