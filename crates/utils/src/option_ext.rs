use crate::f;

/// Extends Option for easy display formatting
pub trait OptionExt {
    /// Better option outputs
    ///
    /// Generic over anything that implements `Display`, this will either be the
    /// value contained within `Some()` or "none" for the `None` variant.
    ///
    /// Handy for summary values that only exist for larger selections, such
    /// as the standard deviation of a single cell.
    ///
    /// ```rust
    /// # use scoring_utils::OptionExt;
    /// let x: Option<f64> = Some(2.5);
    /// assert_eq!(x.display(), "2.5");
    ///
    /// let x: Option<f64> = None;
    /// assert_eq!(x.display(), "none");
    /// ```
    fn display(&self) -> String;
}

impl<T: std::fmt::Display> OptionExt for Option<T> {
    fn display(&self) -> String {
        match self {
            Some(value) => f!("{value}"),
            None => "none".to_string(),
        }
    }
}
