//! Reducer trait for pure, state-replacing transitions.

/// A state value that moves forward by reducing actions.
///
/// Reducers in this workspace:
/// - Never mutate in place; `reduce` returns the next state
/// - Leave the current state untouched when they return an error
/// - Perform no I/O
pub trait Reducer: Clone + Send + Sync + Sized {
    /// The actions this state understands.
    type Action;

    /// The error returned for rejected actions.
    type Error: std::error::Error + Send + Sync;

    /// Computes the state that results from applying `action`.
    fn reduce(&self, action: Self::Action) -> Result<Self, Self::Error>;

    /// Applies `action` in place, keeping the old state on error.
    fn dispatch(&mut self, action: Self::Action) -> Result<(), Self::Error> {
        *self = self.reduce(action)?;
        Ok(())
    }

    /// Reduces a sequence of actions, stopping at the first rejection.
    fn reduce_all(
        &self,
        actions: impl IntoIterator<Item = Self::Action>,
    ) -> Result<Self, Self::Error> {
        actions
            .into_iter()
            .try_fold(self.clone(), |state, action| state.reduce(action))
    }
}
