/// Errors raised while binding a key to a list's ordering.
///
/// Lookups and removals that find nothing return `None` rather than an error.
#[derive(Clone, Copy, Debug, Eq, PartialEq, thiserror::Error)]
pub enum Error {
    /// A key of a different kind than the one the list's ordering was bound to.
    ///
    /// Only orderings that bind at runtime, such as [`Inferred`](crate::dynamic::Inferred),
    /// produce this error. Statically typed orderings reject such keys at compile time.
    #[error("skiplist: {found} keys are not supported by a list bound to {bound} keys")]
    UnsupportedKeyType {
        /// Kind of the first key the list saw.
        bound: &'static str,
        /// Kind of the offending key.
        found: &'static str,
    },
}
