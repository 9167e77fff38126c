//! Shallow equality and one-slot selector memoization.
//!
//! Render bindings compare snapshots by identity. A selector that builds a
//! fresh `Vec` or map on every call would look like a change every time, so
//! [`ShallowSelector`] keeps the previous output whenever the new one is
//! shallow-equal to it.

use std::cell::RefCell;
use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::hash::Hash;
use std::rc::Rc;

/// One-level equality: shared pointers compare by address, containers compare
/// their elements with `shallow_eq`, plain values compare with `==`.
pub trait ShallowEq {
    /// Whether `self` and `other` are shallow-equal.
    fn shallow_eq(&self, other: &Self) -> bool;
}

impl<T: ?Sized> ShallowEq for Rc<T> {
    fn shallow_eq(&self, other: &Self) -> bool {
        std::ptr::eq(Rc::as_ptr(self) as *const (), Rc::as_ptr(other) as *const ())
    }
}

impl<T: ShallowEq> ShallowEq for [T] {
    fn shallow_eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().zip(other).all(|(a, b)| a.shallow_eq(b))
    }
}

impl<T: ShallowEq> ShallowEq for Vec<T> {
    fn shallow_eq(&self, other: &Self) -> bool {
        self.as_slice().shallow_eq(other.as_slice())
    }
}

impl<T: ShallowEq> ShallowEq for Option<T> {
    fn shallow_eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Some(a), Some(b)) => a.shallow_eq(b),
            (None, None) => true,
            _ => false,
        }
    }
}

impl<K: Ord, V: ShallowEq> ShallowEq for BTreeMap<K, V> {
    fn shallow_eq(&self, other: &Self) -> bool {
        self.len() == other.len()
            && self
                .iter()
                .all(|(k, v)| other.get(k).is_some_and(|o| v.shallow_eq(o)))
    }
}

impl<K: Eq + Hash, V: ShallowEq, S: std::hash::BuildHasher> ShallowEq for HashMap<K, V, S> {
    fn shallow_eq(&self, other: &Self) -> bool {
        self.len() == other.len()
            && self
                .iter()
                .all(|(k, v)| other.get(k).is_some_and(|o| v.shallow_eq(o)))
    }
}

macro_rules! shallow_eq_by_value {
    ($($ty:ty),* $(,)?) => {
        $(
            impl ShallowEq for $ty {
                fn shallow_eq(&self, other: &Self) -> bool {
                    self == other
                }
            }
        )*
    };
}

shallow_eq_by_value!(
    (), bool, char, i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize, f32, f64,
    String, &'static str, serde_json::Value,
);

macro_rules! shallow_eq_tuple {
    ($($name:ident : $idx:tt),+) => {
        impl<$($name: ShallowEq),+> ShallowEq for ($($name,)+) {
            fn shallow_eq(&self, other: &Self) -> bool {
                $(self.$idx.shallow_eq(&other.$idx))&&+
            }
        }
    };
}

shallow_eq_tuple!(A: 0);
shallow_eq_tuple!(A: 0, B: 1);
shallow_eq_tuple!(A: 0, B: 1, C: 2);
shallow_eq_tuple!(A: 0, B: 1, C: 2, D: 3);

/// Implement [`ShallowEq`] for a struct by comparing the listed fields.
///
/// ```rust
/// use std::rc::Rc;
/// use turbo_store::{impl_shallow_eq, ShallowEq};
///
/// struct Header {
///     title: String,
///     tags: Rc<Vec<String>>,
/// }
///
/// impl_shallow_eq!(Header { title, tags });
///
/// let tags = Rc::new(vec!["new".to_string()]);
/// let a = Header { title: "Home".into(), tags: tags.clone() };
/// let b = Header { title: "Home".into(), tags };
/// assert!(a.shallow_eq(&b));
/// ```
#[macro_export]
macro_rules! impl_shallow_eq {
    ($ty:ty { $($field:ident),+ $(,)? }) => {
        impl $crate::ShallowEq for $ty {
            fn shallow_eq(&self, other: &Self) -> bool {
                $($crate::ShallowEq::shallow_eq(&self.$field, &other.$field))&&+
            }
        }
    };
}

struct Memo<I, R> {
    input: I,
    output: Rc<R>,
}

/// One-slot memoizer around a projection `I -> R`.
///
/// - If the input is shallow-equal to the previous input, the previous output
///   is returned without running the selector.
/// - Otherwise the selector runs; if its result is shallow-equal to the
///   previous output, the previous `Rc` is returned and the new value dropped.
pub struct ShallowSelector<I, R> {
    selector: Box<dyn Fn(&I) -> R>,
    memo: RefCell<Option<Memo<I, R>>>,
}

impl<I, R> ShallowSelector<I, R>
where
    I: ShallowEq + Clone,
    R: ShallowEq,
{
    /// Wrap a selector.
    pub fn new(selector: impl Fn(&I) -> R + 'static) -> Self {
        Self {
            selector: Box::new(selector),
            memo: RefCell::new(None),
        }
    }

    /// Project `input`, reusing the previous output when possible.
    pub fn select(&self, input: &I) -> Rc<R> {
        if let Some(memo) = self.memo.borrow().as_ref() {
            if memo.input.shallow_eq(input) {
                return Rc::clone(&memo.output);
            }
        }

        let next = (self.selector)(input);

        let mut memo = self.memo.borrow_mut();
        let output = match memo.as_ref() {
            Some(prev) if prev.output.as_ref().shallow_eq(&next) => Rc::clone(&prev.output),
            _ => Rc::new(next),
        };
        *memo = Some(Memo {
            input: input.clone(),
            output: Rc::clone(&output),
        });
        output
    }

    /// Forget the memoized pair.
    pub fn reset(&self) {
        self.memo.borrow_mut().take();
    }
}

impl<I, R> fmt::Debug for ShallowSelector<I, R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ShallowSelector")
            .field("memoized", &self.memo.borrow().is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[derive(Debug)]
    struct Catalog {
        products: Vec<Rc<String>>,
        total: u32,
    }

    #[test]
    fn test_rc_compares_by_address() {
        let a = Rc::new(5);
        let b = Rc::new(5);
        assert!(a.shallow_eq(&a.clone()));
        assert!(!a.shallow_eq(&b));
    }

    #[test]
    fn test_vec_compares_elements() {
        let x = Rc::new("x".to_string());
        let y = Rc::new("y".to_string());
        assert!(vec![x.clone(), y.clone()].shallow_eq(&vec![x.clone(), y.clone()]));
        assert!(!vec![x.clone()].shallow_eq(&vec![x.clone(), y.clone()]));
        assert!(!vec![Rc::new("x".to_string())].shallow_eq(&vec![x]));
    }

    #[test]
    fn test_maps_require_same_key_set() {
        let mut a = BTreeMap::new();
        a.insert("search", "phone".to_string());
        let mut b = a.clone();
        assert!(a.shallow_eq(&b));

        b.insert("current", "1".to_string());
        assert!(!a.shallow_eq(&b));
    }

    #[test]
    fn test_same_input_skips_selector() {
        let runs = Rc::new(Cell::new(0));
        let selector = {
            let runs = Rc::clone(&runs);
            ShallowSelector::new(move |c: &Rc<Catalog>| {
                runs.set(runs.get() + 1);
                c.products.clone()
            })
        };
        let catalog = Rc::new(Catalog {
            products: vec![Rc::new("a".into())],
            total: 1,
        });

        let first = selector.select(&catalog);
        let second = selector.select(&catalog);

        assert!(Rc::ptr_eq(&first, &second));
        assert_eq!(runs.get(), 1);
    }

    #[test]
    fn test_shallow_equal_output_keeps_reference() {
        let selector = ShallowSelector::new(|c: &Rc<Catalog>| c.products.clone());
        let shared = vec![Rc::new("a".to_string()), Rc::new("b".to_string())];

        let v1 = Rc::new(Catalog { products: shared.clone(), total: 2 });
        let v2 = Rc::new(Catalog { products: shared.clone(), total: 3 });

        let first = selector.select(&v1);
        let second = selector.select(&v2);
        assert!(Rc::ptr_eq(&first, &second));
        assert_eq!(v2.total, 3);
    }

    #[test]
    fn test_changed_output_yields_new_reference() {
        let selector = ShallowSelector::new(|c: &Rc<Catalog>| c.products.clone());
        let v1 = Rc::new(Catalog { products: vec![Rc::new("a".into())], total: 1 });
        let v2 = Rc::new(Catalog { products: vec![Rc::new("a".into())], total: 1 });

        let first = selector.select(&v1);
        let second = selector.select(&v2);
        assert!(!Rc::ptr_eq(&first, &second));
        assert_eq!(*first[0], *second[0]);
    }

    #[test]
    fn test_reset_forgets_memo() {
        let selector = ShallowSelector::new(|n: &u32| vec![Rc::new(*n)]);
        let first = selector.select(&1);
        selector.reset();
        let second = selector.select(&1);
        assert!(!Rc::ptr_eq(&first, &second));
    }

    #[test]
    fn test_struct_macro() {
        struct Pair {
            name: String,
            items: Rc<Vec<u8>>,
        }
        crate::impl_shallow_eq!(Pair { name, items });

        let items = Rc::new(vec![1, 2]);
        let a = Pair { name: "n".into(), items: items.clone() };
        let b = Pair { name: "n".into(), items };
        let c = Pair { name: "n".into(), items: Rc::new(vec![1, 2]) };
        assert!(a.shallow_eq(&b));
        assert!(!a.shallow_eq(&c));
    }
}
