use crate::list::{next_node, prev_node, Node};
use std::fmt;
use std::ptr::NonNull;

/// A read-only position in a `List`.
///
/// A `Pos` is a thin, copyable pointer to a node of a list (or to its ghost
/// node, i.e. [`List::end`]). Unlike an iterator, it does not borrow the list,
/// so the list can be mutated while positions are held:
/// - inserting invalidates no position;
/// - erasing invalidates only the positions of the erased elements;
/// - splicing and swapping invalidate no position. A position of a spliced
///   element follows the element into its new list.
///
/// Nothing checks these rules at runtime, so every operation reading through a
/// position is `unsafe`: the caller promises that the position is still valid.
///
/// Positions are compared by the node they point to, whichever list created
/// them, and whichever of [`Pos`] and [`PosMut`] they are.
///
/// # Examples
///
/// ```
/// use ring_list::List;
/// use std::iter::FromIterator;
///
/// let mut list = List::from_iter(['A', 'B', 'C']);
/// let b = unsafe { list.begin().next() };
///
/// // Mutating the list keeps `b` valid.
/// list.push_front('Z');
/// unsafe {
///     assert_eq!(b.get(), &'B');
///     assert_eq!(b.prev().get(), &'A');
///     assert_eq!(b.next().next(), list.end());
/// }
/// ```
///
/// A position can never be created out of nothing:
///
/// ```compile_fail
/// use ring_list::Pos;
/// let pos: Pos<i32> = Default::default();
/// ```
///
/// Nor can it leave the thread of its list:
///
/// ```compile_fail
/// use ring_list::List;
///
/// let list = List::from(vec![1]);
/// let pos = list.begin();
/// std::thread::spawn(move || pos).join().unwrap();
/// ```
///
/// [`List::end`]: crate::List::end
pub struct Pos<T> {
    pub(crate) node: NonNull<Node<T>>,
}

/// A position in a `List` that also grants mutable access to its element.
///
/// See [`Pos`] for the validity rules. A `PosMut` converts into a [`Pos`], but
/// not the other way around.
///
/// ```compile_fail
/// use ring_list::{List, Pos, PosMut};
///
/// let list = List::from(vec![1]);
/// let pos: PosMut<i32> = PosMut::from(list.begin());
/// ```
pub struct PosMut<T> {
    pub(crate) node: NonNull<Node<T>>,
}

macro_rules! impl_position {
    ($POS:ident) => {
        impl<T> Clone for $POS<T> {
            fn clone(&self) -> Self {
                *self
            }
        }

        impl<T> Copy for $POS<T> {}

        impl<T> fmt::Debug for $POS<T> {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.debug_tuple(stringify!($POS)).field(&self.node).finish()
            }
        }

        /// Positions are equal if they point to the same node.
        impl<T> PartialEq<Pos<T>> for $POS<T> {
            fn eq(&self, other: &Pos<T>) -> bool {
                self.node == other.node
            }
        }

        /// Positions are equal if they point to the same node.
        impl<T> PartialEq<PosMut<T>> for $POS<T> {
            fn eq(&self, other: &PosMut<T>) -> bool {
                self.node == other.node
            }
        }

        impl<T> Eq for $POS<T> {}

        impl<T> $POS<T> {
            pub(crate) fn new(node: NonNull<Node<T>>) -> Self {
                Self { node }
            }

            /// Returns the position of the next node, which is the ghost node
            /// if `self` is the last element, or the first element if `self` is
            /// the ghost node.
            ///
            /// This operation should compute in *O*(*1*) time.
            ///
            /// # Safety
            ///
            /// The position must be valid.
            #[inline]
            pub unsafe fn next(self) -> Self {
                Self::new(next_node(self.node))
            }

            /// Returns the position of the previous node, which is the ghost node
            /// if `self` is the first element, or the last element if `self` is
            /// the ghost node.
            ///
            /// This operation should compute in *O*(*1*) time.
            ///
            /// # Safety
            ///
            /// The position must be valid.
            #[inline]
            pub unsafe fn prev(self) -> Self {
                Self::new(prev_node(self.node))
            }

            /// Move the position to the next node. See [`next`](Self::next).
            ///
            /// # Safety
            ///
            /// The position must be valid.
            #[inline]
            pub unsafe fn move_next(&mut self) {
                *self = self.next();
            }

            /// Move the position to the previous node. See [`prev`](Self::prev).
            ///
            /// # Safety
            ///
            /// The position must be valid.
            #[inline]
            pub unsafe fn move_prev(&mut self) {
                *self = self.prev();
            }

            /// Move forward the position by given steps.
            ///
            /// The ghost node is counted as a step, like any element.
            ///
            /// This operation should compute in *O*(*n*) time.
            ///
            /// # Safety
            ///
            /// The position must be valid.
            pub unsafe fn seek_forward(&mut self, steps: usize) {
                for _ in 0..steps {
                    self.move_next();
                }
            }

            /// Move backward the position by given steps.
            ///
            /// The ghost node is counted as a step, like any element.
            ///
            /// This operation should compute in *O*(*n*) time.
            ///
            /// # Safety
            ///
            /// The position must be valid.
            pub unsafe fn seek_backward(&mut self, steps: usize) {
                for _ in 0..steps {
                    self.move_prev();
                }
            }

            /// Returns a reference to the element at the position.
            ///
            /// # Safety
            ///
            /// - The position must be valid, and must not be the ghost node
            ///   ([`List::end`](crate::List::end));
            /// - the element must not be mutated or dropped while the returned
            ///   reference is alive.
            #[inline]
            pub unsafe fn get<'a>(self) -> &'a T {
                &(*self.node.as_ptr()).element
            }
        }
    };
}

impl_position!(Pos);
impl_position!(PosMut);

impl<T> PosMut<T> {
    /// Returns a mutable reference to the element at the position.
    ///
    /// # Safety
    ///
    /// - The position must be valid, and must not be the ghost node
    ///   ([`List::end`](crate::List::end));
    /// - the element must not be accessed by any other means, nor dropped,
    ///   while the returned reference is alive.
    ///
    /// # Examples
    ///
    /// ```
    /// use ring_list::List;
    /// use std::iter::FromIterator;
    ///
    /// let mut list = List::from_iter([1, 2, 3]);
    /// unsafe {
    ///     *list.begin_mut().next().get_mut() *= 10;
    /// }
    /// assert_eq!(Vec::from_iter(list), vec![1, 20, 3]);
    /// ```
    #[inline]
    pub unsafe fn get_mut<'a>(self) -> &'a mut T {
        &mut (*self.node.as_ptr()).element
    }
}

/// A mutable position can be used wherever a read-only one is expected.
impl<T> From<PosMut<T>> for Pos<T> {
    fn from(pos: PosMut<T>) -> Self {
        Pos::new(pos.node)
    }
}
