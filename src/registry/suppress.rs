//! Scoped output suppression
//!
//! Both guards change the root logger's handlers when created and put them
//! back when dropped, including during unwinding. A no-op placeholder
//! handler keeps the root from looking handler-less in the meantime.
//!
//! The guards do not lock the handler list for their whole lifetime: do not
//! add or remove root handlers from another thread while one is alive.
//! A [`Registry::reset`] while a guard is alive wins; the guard restores
//! nothing when dropped afterwards.

use super::Registry;
use crate::core::{Handler, Logger};

/// Detaches the default handler; custom handlers keep receiving records.
///
/// Dropping the guard always re-attaches the default handler, even when it
/// was already detached on entry. Nested inside a [`Registry::suppress_all`]
/// scope, this means the default handler is live again for the rest of the
/// outer scope.
///
/// Created by [`Registry::suppress_default`].
#[must_use = "suppression ends as soon as the guard is dropped"]
pub struct DefaultHandlerSuppression<'a> {
    registry: &'a Registry,
    placeholder: Option<Handler>,
    epoch: u64,
}

impl<'a> DefaultHandlerSuppression<'a> {
    pub(crate) fn enter(registry: &'a Registry) -> Self {
        registry.disable_default_handler();

        let root = registry.get_root_logger();
        let placeholder = if root.has_handlers() {
            None
        } else {
            let placeholder = Handler::null();
            root.add_handler(placeholder.clone());
            Some(placeholder)
        };

        Self {
            registry,
            placeholder,
            epoch: registry.reset_epoch(),
        }
    }

    /// Whether entering the scope had to attach a placeholder
    pub fn placeholder_attached(&self) -> bool {
        self.placeholder.is_some()
    }
}

impl Drop for DefaultHandlerSuppression<'_> {
    fn drop(&mut self) {
        if self.registry.reset_epoch() != self.epoch {
            return;
        }
        self.registry.enable_default_handler();
        if let Some(placeholder) = self.placeholder.take() {
            self.registry.get_root_logger().remove_handler(&placeholder);
        }
    }
}

/// Detaches every root handler and restores them, in order, on drop.
///
/// Created by [`Registry::suppress_all`].
#[must_use = "suppression ends as soon as the guard is dropped"]
pub struct AllHandlerSuppression<'a> {
    registry: &'a Registry,
    root: Logger,
    snapshot: Vec<Handler>,
    placeholder: Handler,
    epoch: u64,
}

impl<'a> AllHandlerSuppression<'a> {
    pub(crate) fn enter(registry: &'a Registry) -> Self {
        let root = registry.get_root_logger();
        let snapshot = root.clear_handlers();
        let placeholder = Handler::null();
        root.add_handler(placeholder.clone());

        Self {
            registry,
            root,
            snapshot,
            placeholder,
            epoch: registry.reset_epoch(),
        }
    }

    /// Handlers that will be re-attached on drop
    pub fn suppressed_handlers(&self) -> &[Handler] {
        &self.snapshot
    }
}

impl Drop for AllHandlerSuppression<'_> {
    fn drop(&mut self) {
        if self.registry.reset_epoch() != self.epoch {
            return;
        }
        self.root.remove_handler(&self.placeholder);
        for handler in self.snapshot.drain(..) {
            self.root.add_handler(handler);
        }
    }
}
