//! # Spread Adapter
//!
//! Wraps a fixed-arity function so it can be invoked with a tuple's
//! elements unpacked as positional arguments.
//!
//! The adapter is a pure unpacking operation; it performs no coercion of
//! element types. Two reshaping rules apply:
//!
//! - If the tuple has **more** elements than the function declares
//!   parameters, the extras are silently ignored. This is what lets a
//!   downstream stage stay agnostic of side-channel results it never reads
//!   (a storage acknowledgment, say).
//! - If the tuple has **fewer** elements, the function declares `Option`
//!   parameters and the missing positions receive `None` rather than an
//!   error; validating required arguments is the function's own business.
//!
//! ```rust
//! use taskweave::spread;
//!
//! let add = spread(|x: i32, y: i32| x + y);
//! assert_eq!(add((1, 2, 3)), 3); // the extra element is ignored
//!
//! let pair = spread(|x: Option<i32>, y: Option<i32>| (x, y));
//! assert_eq!(pair((1,)), (Some(1), None)); // absent position becomes None
//! ```

/// Functions callable with an argument tuple unpacked positionally.
///
/// Implemented for `FnOnce` of arities 1 through 4.
pub trait FnArgs<Args> {
  /// The function's return type.
  type Output;

  /// Invokes the function with `args` unpacked as positional arguments.
  fn call(self, args: Args) -> Self::Output;
}

/// Tuples that can be reshaped into a function's argument list.
///
/// Longer tuples truncate to a prefix; shorter tuples pad the missing
/// positions with `None` when the target arguments are `Option`s.
pub trait SpreadInto<Args> {
  /// Reshapes the tuple into `Args`.
  fn spread_into(self) -> Args;
}

/// Adapts `f` so it can be invoked with a tuple instead of positional
/// arguments: `spread(f)` returns a closure whose single tuple argument is
/// unpacked into `f`'s parameters, returning `f`'s result unchanged.
pub fn spread<T, F, Args>(f: F) -> impl Fn(T) -> F::Output + Clone
where
  T: SpreadInto<Args>,
  F: FnArgs<Args> + Clone,
{
  move |tuple: T| f.clone().call(tuple.spread_into())
}

macro_rules! impl_fn_args {
  ($(($T:ident, $arg:ident)),+) => {
    impl<Func, R, $($T,)+> FnArgs<($($T,)+)> for Func
    where
      Func: FnOnce($($T),+) -> R,
    {
      type Output = R;

      fn call(self, args: ($($T,)+)) -> R {
        let ($($arg,)+) = args;
        (self)($($arg),+)
      }
    }
  };
}

impl_fn_args!((A, a));
impl_fn_args!((A, a), (B, b));
impl_fn_args!((A, a), (B, b), (C, c));
impl_fn_args!((A, a), (B, b), (C, c), (D, d));

// A tuple at least as long as the argument list hands over its prefix and
// drops the rest.
macro_rules! impl_spread_prefix {
  ([$(($T:ident, $index:tt)),+], [$($Rest:ident),*]) => {
    impl<$($T,)+ $($Rest,)*> SpreadInto<($($T,)+)> for ($($T,)+ $($Rest,)*) {
      fn spread_into(self) -> ($($T,)+) {
        ($(self.$index,)+)
      }
    }
  };
}

impl_spread_prefix!([(A, 0)], []);
impl_spread_prefix!([(A, 0)], [B]);
impl_spread_prefix!([(A, 0)], [B, C]);
impl_spread_prefix!([(A, 0)], [B, C, D]);
impl_spread_prefix!([(A, 0)], [B, C, D, E]);
impl_spread_prefix!([(A, 0), (B, 1)], []);
impl_spread_prefix!([(A, 0), (B, 1)], [C]);
impl_spread_prefix!([(A, 0), (B, 1)], [C, D]);
impl_spread_prefix!([(A, 0), (B, 1)], [C, D, E]);
impl_spread_prefix!([(A, 0), (B, 1), (C, 2)], []);
impl_spread_prefix!([(A, 0), (B, 1), (C, 2)], [D]);
impl_spread_prefix!([(A, 0), (B, 1), (C, 2)], [D, E]);
impl_spread_prefix!([(A, 0), (B, 1), (C, 2), (D, 3)], []);
impl_spread_prefix!([(A, 0), (B, 1), (C, 2), (D, 3)], [E]);

// Option-declared argument lists accept tuples of any arity: present
// positions arrive as `Some`, absent positions as `None`, extras drop.
macro_rules! impl_spread_padded {
  ([$(($T:ident, $index:tt)),*], [$($Missing:ident),*], [$($Rest:ident),*]) => {
    impl<$($T,)* $($Missing,)* $($Rest,)*>
      SpreadInto<($(Option<$T>,)* $(Option<$Missing>,)*)> for ($($T,)* $($Rest,)*)
    {
      fn spread_into(self) -> ($(Option<$T>,)* $(Option<$Missing>,)*) {
        ($(Some(self.$index),)* $(None::<$Missing>,)*)
      }
    }
  };
}

impl_spread_padded!([(A, 0)], [], []);
impl_spread_padded!([(A, 0)], [], [B]);
impl_spread_padded!([(A, 0)], [], [B, C]);
impl_spread_padded!([(A, 0)], [], [B, C, D]);
impl_spread_padded!([(A, 0)], [], [B, C, D, E]);
impl_spread_padded!([(A, 0)], [B], []);
impl_spread_padded!([(A, 0), (B, 1)], [], []);
impl_spread_padded!([(A, 0), (B, 1)], [], [C]);
impl_spread_padded!([(A, 0), (B, 1)], [], [C, D]);
impl_spread_padded!([(A, 0), (B, 1)], [], [C, D, E]);
impl_spread_padded!([(A, 0)], [B, C], []);
impl_spread_padded!([(A, 0), (B, 1)], [C], []);
impl_spread_padded!([(A, 0), (B, 1), (C, 2)], [], []);
impl_spread_padded!([(A, 0), (B, 1), (C, 2)], [], [D]);
impl_spread_padded!([(A, 0), (B, 1), (C, 2)], [], [D, E]);
impl_spread_padded!([(A, 0)], [B, C, D], []);
impl_spread_padded!([(A, 0), (B, 1)], [C, D], []);
impl_spread_padded!([(A, 0), (B, 1), (C, 2)], [D], []);
impl_spread_padded!([(A, 0), (B, 1), (C, 2), (D, 3)], [], []);
impl_spread_padded!([(A, 0), (B, 1), (C, 2), (D, 3)], [], [E]);
