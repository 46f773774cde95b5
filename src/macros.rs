/// Construct a [`Value::Map`][crate::Value::Map] using a literal syntax.
///
/// Keys are identifiers, values are either nested `{ ... }` maps, `[ ... ]`
/// lists, `None`, or any expression that implements
/// [`Into<Value>`][crate::Value].
///
/// # Examples
///
/// ```
/// let value = whisker::value! {
///     user: {
///         name: "John",
///         roles: ["admin", "editor"],
///     },
///     active: true,
///     manager: None,
/// };
/// ```
#[macro_export]
macro_rules! value {
    ($($tt:tt)*) => {
        $crate::_value!({ $($tt)* })
    };
}

// Based on `serde_json::json!`
#[macro_export]
#[doc(hidden)]
macro_rules! _value {
    // Lists, invoked as `_value!(@list [] $($tt)*)`.

    (@list [$($elems:expr,)*]) => {
        $crate::_value_list![$($elems,)*]
    };
    (@list [$($elems:expr),*]) => {
        $crate::_value_list![$($elems),*]
    };
    (@list [$($elems:expr,)*] None $($rest:tt)*) => {
        $crate::_value!(@list [$($elems,)* $crate::_value!(None)] $($rest)*)
    };
    (@list [$($elems:expr,)*] [$($list:tt)*] $($rest:tt)*) => {
        $crate::_value!(@list [$($elems,)* $crate::_value!([$($list)*])] $($rest)*)
    };
    (@list [$($elems:expr,)*] {$($map:tt)*} $($rest:tt)*) => {
        $crate::_value!(@list [$($elems,)* $crate::_value!({$($map)*})] $($rest)*)
    };
    (@list [$($elems:expr,)*] $next:expr, $($rest:tt)*) => {
        $crate::_value!(@list [$($elems,)* $crate::_value!($next),] $($rest)*)
    };
    (@list [$($elems:expr,)*] $last:expr) => {
        $crate::_value!(@list [$($elems,)* $crate::_value!($last)])
    };
    (@list [$($elems:expr),*] , $($rest:tt)*) => {
        $crate::_value!(@list [$($elems,)*] $($rest)*)
    };
    (@list [$($elems:expr),*] $unexpected:tt $($rest:tt)*) => {
        $crate::_value_unexpected!($unexpected)
    };

    // Map entries, invoked as `_value!(@map $map () ($($tt)*) ($($tt)*))`.
    // The second copy of the tokens is used to point errors at the offending
    // token.

    (@map $map:ident () () ()) => {};
    (@map $map:ident [$key:ident] ($value:expr) , $($rest:tt)*) => {
        let _ = $map.insert(::std::string::String::from(stringify!($key)), $value);
        $crate::_value!(@map $map () ($($rest)*) ($($rest)*));
    };
    (@map $map:ident [$key:ident] ($value:expr) $unexpected:tt $($rest:tt)*) => {
        $crate::_value_unexpected!($unexpected);
    };
    (@map $map:ident [$key:ident] ($value:expr)) => {
        let _ = $map.insert(::std::string::String::from(stringify!($key)), $value);
    };
    (@map $map:ident ($key:ident) (: None $($rest:tt)*) $copy:tt) => {
        $crate::_value!(@map $map [$key] ($crate::_value!(None)) $($rest)*);
    };
    (@map $map:ident ($key:ident) (: [$($list:tt)*] $($rest:tt)*) $copy:tt) => {
        $crate::_value!(@map $map [$key] ($crate::_value!([$($list)*])) $($rest)*);
    };
    (@map $map:ident ($key:ident) (: {$($inner:tt)*} $($rest:tt)*) $copy:tt) => {
        $crate::_value!(@map $map [$key] ($crate::_value!({$($inner)*})) $($rest)*);
    };
    (@map $map:ident ($key:ident) (: $value:expr , $($rest:tt)*) $copy:tt) => {
        $crate::_value!(@map $map [$key] ($crate::_value!($value)) , $($rest)*);
    };
    (@map $map:ident ($key:ident) (: $value:expr) $copy:tt) => {
        $crate::_value!(@map $map [$key] ($crate::_value!($value)));
    };
    // Missing value, "unexpected end of macro invocation".
    (@map $map:ident ($key:ident) (:) $copy:tt) => {
        $crate::_value!();
    };
    (@map $map:ident ($key:ident) () $copy:tt) => {
        $crate::_value!();
    };
    // Misplaced colon or comma, "no rules expected the token".
    (@map $map:ident () (: $($rest:tt)*) ($colon:tt $($copy:tt)*)) => {
        $crate::_value_unexpected!($colon);
    };
    (@map $map:ident ($($key:tt)*) (, $($rest:tt)*) ($comma:tt $($copy:tt)*)) => {
        $crate::_value_unexpected!($comma);
    };
    (@map $map:ident ($($key:tt)*) (: $($unexpected:tt)+) $copy:tt) => {
        $crate::_value_expect_expr_comma!($($unexpected)+);
    };
    (@map $map:ident ($($key:tt)*) ($tt:tt $($rest:tt)*) $copy:tt) => {
        $crate::_value!(@map $map ($($key)* $tt) ($($rest)*) ($($rest)*));
    };

    // Values.

    (None) => {
        $crate::Value::None
    };
    ([]) => {
        $crate::Value::List($crate::_value_list![])
    };
    ([ $($tt:tt)+ ]) => {
        $crate::Value::List($crate::_value!(@list [] $($tt)+))
    };
    ({}) => {
        $crate::Value::Map($crate::Map::new())
    };
    ({ $($tt:tt)+ }) => {
        $crate::Value::Map({
            let mut map = $crate::Map::new();
            $crate::_value!(@map map () ($($tt)+) ($($tt)+));
            map
        })
    };
    ($other:expr) => {
        $crate::Value::from($other)
    };
}

#[macro_export]
#[doc(hidden)]
macro_rules! _value_list {
    ($($content:tt)*) => {
        ::std::vec![$($content)*]
    };
}

#[macro_export]
#[doc(hidden)]
macro_rules! _value_unexpected {
    () => {};
}

#[macro_export]
#[doc(hidden)]
macro_rules! _value_expect_expr_comma {
    ($e:expr , $($tt:tt)*) => {};
}
