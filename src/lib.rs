//! This crate provides a doubly-linked list with owned nodes, implemented as a
//! ring closed by a ghost node.
//!
//! The [`List`] allows inserting and removing elements at any given position in
//! constant time, and moving a range of elements from one place to another (of
//! the same list or of another list) in constant time, without moving, copying
//! or dropping the elements. In compromise, reaching the element at an index
//! takes *O*(*n*) time.
//!
//! Here is a quick example showing how the list works.
//!
//! ```
//! use ring_list::List;
//! use std::iter::FromIterator;
//!
//! let mut list = List::from_iter([1, 2, 3, 4]);
//! let mut other = List::from_iter([5, 6, 7, 8]);
//!
//! unsafe {
//!     let three = list.begin().next().next();
//!     list.insert(three, 0); // becomes [1, 2, 0, 3, 4]
//!
//!     // move [6, 7] right before 3
//!     let first = other.begin().next();
//!     let last = other.end().prev();
//!     list.splice(three, &mut other, first, last);
//!
//!     // `three` is still valid, and its element is still 3
//!     assert_eq!(three.get(), &3);
//! }
//! assert_eq!(Vec::from_iter(list), vec![1, 2, 0, 6, 7, 3, 4]);
//! assert_eq!(Vec::from_iter(other), vec![5, 8]);
//! ```
//!
//! # Memory Layout
//!
//! The memory layout of the list is like the following graph:
//! ```text
//!          ┌─────────────────────────────────────────────────────────────────────┐
//!          ↓                                                     (Ghost) Node N  │
//!    ╔═══════════╗           ╔═══════════╗                        ┌───────────┐  │
//!    ║   next    ║ ────────→ ║   next    ║ ────────→ ┄┄ ────────→ │   next    │ ─┘
//!    ╟───────────╢           ╟───────────╢     Node 2, 3, ...     ├───────────┤
//! ┌─ ║   prev    ║ ←──────── ║   prev    ║ ←──────── ┄┄ ←──────── │   prev    │
//! │  ╟───────────╢           ╟───────────╢                        ├───────────┤
//! │  ║ payload T ║           ║ payload T ║                        ┊No payload ┊
//! │  ╚═══════════╝           ╚═══════════╝                        └╌╌╌╌╌╌╌╌╌╌╌┘
//! │      Node 0                  Node 1                               ↑   ↑
//! └───────────────────────────────────────────────────────────────────┘   │
//! ╔═══════════╗                                                           │
//! ║   ghost   ║ ──────────────────────────────────────────────────────────┘
//! ╚═══════════╝
//!     List
//! ```
//! The `List` contains nothing but a pointer `ghost` to the ghost node. The
//! list does not store its length, so that moving a range between two lists
//! never needs to count it.
//!
//! Each node of the list `List<T>` is allocated on heap, which contains:
//! - the `next` pointer that points to the next element (or the ghost node if it
//!   is the last element in the list);
//! - the `prev` pointer that points to the previous element (or the ghost node if
//!   it is the first element in the list);
//! - the actual payload `T`, except for the ghost node.
//!
//! Initially, the ghost node of an empty list points to itself both ways. As
//! elements are inserted into the list, `ghost.next` points to the first element,
//! and `ghost.prev` points to the last element of the list.
//!
//! The ghost node is allocated when the list is created and freed when it is
//! dropped. It never moves, even when the `List` value itself is moved, or when
//! the elements of two lists are [swapped](List::swap).
//!
//! # Positions
//!
//! A position ([`Pos`], or [`PosMut`] which also allows mutating the element) is
//! a copyable pointer to a node of a list. The position of the ghost node is
//! [`end`](List::end); the position of the first element (or `end` if the list
//! is empty) is [`begin`](List::begin). Positions are cyclic: the next position
//! of the last element is `end`, and the next position of `end` is `begin`.
//!
//! Positions do not borrow the list. They stay valid while the list is mutated:
//! - inserting invalidates no position;
//! - erasing invalidates only the positions of the erased elements;
//! - splicing and swapping invalidate no position, and positions of moved elements
//!   follow them into their new list;
//! - dropping a list invalidates all of its positions.
//!
//! Since this cannot be checked by the compiler, reading through a position and
//! passing a position to the list are `unsafe`.
//!
//! ## Examples
//!
//! ```
//! use ring_list::List;
//! use std::iter::FromIterator;
//!
//! let mut list = List::from_iter(['a', 'b', 'c']);
//! unsafe {
//!     let b = list.begin().next();
//!     list.erase(list.begin());
//!     list.push_front('z');
//!     assert_eq!(b.get(), &'b');
//!     assert_eq!(b.prev().get(), &'z');
//!     assert_eq!(list.end().next(), list.begin());
//! }
//! ```
//!
//! # Iteration
//!
//! Iterating over a list is by the [`Iter`] and [`IterMut`] iterators. These are
//! double-ended iterators and iterate the list like an array (fused and non-cyclic).
//! [`IterMut`] provides mutability of the elements (but not the linked structure of
//! the list). Unlike positions, iterators borrow the list.
//!
//! ## Examples
//!
//! ```
//! use ring_list::List;
//! use std::iter::FromIterator;
//!
//! let mut list = List::from_iter([1, 2, 3]);
//! let mut iter = list.iter();
//! assert_eq!(iter.next(), Some(&1));
//! assert_eq!(iter.next(), Some(&2));
//! assert_eq!(iter.next(), Some(&3));
//! assert_eq!(iter.next(), None);
//! assert_eq!(iter.next(), None); // Fused and non-cyclic
//!
//! list.iter_mut().for_each(|item| *item *= 2);
//! assert_eq!(Vec::from_iter(list), vec![2, 4, 6]);
//! ```
//!
//! # Panics
//!
//! No operation of the list can fail, except when an element operation panics
//! (cloning, comparing or dropping an element), or when allocation fails. In that
//! case:
//! - [`insert`](List::insert) and the pushes leave the list unchanged;
//! - [`clone`](Clone::clone) drops the clones made so far, and the source is left
//!   unchanged;
//! - [`clone_from`](Clone::clone_from) leaves the destination unchanged;
//! - dropping or erasing keeps dropping the rest of the elements.

#[doc(inline)]
pub use list::iterator::{IntoIter, Iter, IterMut};
#[doc(inline)]
pub use list::position::{Pos, PosMut};
#[doc(inline)]
pub use list::List;

pub mod list;

#[cfg(test)]
mod test_utils;
