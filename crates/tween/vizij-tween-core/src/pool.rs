//! Free-list of recycled animation instances.

use std::cell::RefCell;
use std::rc::Rc;

use tracing::trace;

use crate::animation::Animation;
use crate::config::Config;

pub(crate) type AnimationCell = Rc<RefCell<Animation>>;

#[derive(Debug, Default)]
pub(crate) struct AnimationPool {
    free: Vec<AnimationCell>,
    max: usize,
}

impl AnimationPool {
    pub(crate) fn new(cfg: &Config) -> Self {
        let prewarm = cfg.pool_prewarm.min(cfg.pool_max);
        let free = (0..prewarm)
            .map(|_| Rc::new(RefCell::new(Animation::new())))
            .collect();
        Self {
            free,
            max: cfg.pool_max,
        }
    }

    /// Pop a free instance, or allocate one when the pool is empty.
    ///
    /// Instances still referenced from an in-flight borrow are skipped.
    pub(crate) fn acquire(&mut self) -> AnimationCell {
        while let Some(cell) = self.free.pop() {
            if cell.try_borrow_mut().is_ok() {
                return cell;
            }
        }
        trace!("animation pool empty; allocating");
        Rc::new(RefCell::new(Animation::new()))
    }

    /// Return a released instance. Beyond `max` the instance is dropped.
    pub(crate) fn put(&mut self, cell: AnimationCell) {
        if self.free.len() < self.max {
            self.free.push(cell);
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.free.len()
    }
}
