//! Keyword-argument syntax for filter construction.

/// Builds a keyword bundle: a `Vec<(&'static str, Expected)>`.
///
/// Keys are written as identifiers (`name`, `age__inrange`, `_key_missing_`)
/// or as string literals with `=>` when they are not valid identifiers.
///
/// ```
/// use standout_sift::{kwargs, Expected, RecordFilter};
///
/// let bundle = kwargs!(name = "abcdef", value__inrange = (10, 13), _key_missing_ = true);
/// assert_eq!(bundle[0].0, "name");
/// assert_eq!(bundle[1].1, Expected::from((10, 13)));
///
/// let strict = kwargs!("first-name" => "Ada", "_key_missing_" => Expected::Null);
/// assert_eq!(strict[1].1, Expected::Null);
/// assert!(RecordFilter::from_kwargs(strict).is_ok());
/// ```
#[macro_export]
macro_rules! kwargs {
    () => {
        ::std::vec::Vec::<(&'static str, $crate::Expected)>::new()
    };
    ($($key:ident = $value:expr),+ $(,)?) => {
        ::std::vec![$((::std::stringify!($key), $crate::Expected::from($value))),+]
    };
    ($($key:literal => $value:expr),+ $(,)?) => {
        ::std::vec![$(($key, $crate::Expected::from($value))),+]
    };
}
