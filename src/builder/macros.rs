//! Macros for ergonomic machine construction.

/// Declare plain relabeling transitions as a `Vec<Transition>`.
///
/// Each entry reads `(from => to, trigger)`.
///
/// # Example
///
/// ```
/// use statekeeper::transitions;
///
/// let walk = transitions![
///     ("state 1" => "state 2", "walk"),
///     ("state 2" => "state 3", "walk"),
///     ("state 3" => "state 1", "walk"),
/// ];
///
/// assert_eq!(walk.len(), 3);
/// assert_eq!(walk[2].to(), "state 1");
/// ```
#[macro_export]
macro_rules! transitions {
    ($(($from:expr => $to:expr, $trigger:expr)),* $(,)?) => {
        vec![$($crate::core::Transition::new($from, $to, $trigger)),*]
    };
}
