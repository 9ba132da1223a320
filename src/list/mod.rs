use std::alloc::{self, Layout};
use std::fmt::{Debug, Formatter};
use std::marker::PhantomData;
use std::mem;
use std::ptr::NonNull;

use crate::list::position::{Pos, PosMut};
use crate::{IntoIter, Iter, IterMut};

pub mod iterator;
pub mod position;

mod algorithms;

/// The `List` is a doubly-linked list with owned nodes, implemented as a ring.
/// It allows inserting, removing elements at any given position in constant time,
/// and moving a range of elements to another position (of the same list or of
/// another one) in constant time, without moving the elements themselves.
/// In compromise, accessing elements at any index takes *O*(*n*) time.
///
/// The `List` contains nothing but a pointer to its ghost node. The ghost node
/// is allocated once when the list is created and never moves, so [`end`] of a
/// list is the same position for the whole lifetime of the list.
///
/// Positions ([`Pos`] and [`PosMut`]) returned by the list do not borrow it.
/// They stay valid as long as the node they point at is linked into *some*
/// list:
/// - inserting invalidates no position;
/// - erasing invalidates only the positions of the erased elements;
/// - splicing and swapping invalidate no position.
///
/// # Naming Conventions
///
/// - `front..=back`: a closed range of list nodes, both inclusive;
/// - `first..last`: a half-open range of list nodes, left inclusive and right
///   exclusive (probably the ghost node).
///
/// [`end`]: List::end
pub struct List<T> {
    ghost: Ghost<T>,
    _marker: PhantomData<Box<Node<T>>>,
}

#[repr(C)]
pub(crate) struct Node<T> {
    pub(crate) next: NonNull<Node<T>>,
    pub(crate) prev: NonNull<Node<T>>,
    pub(crate) element: T,
}

struct Erased;

/// Owner of the payload-less ghost node.
///
/// The ghost node is allocated with the size of `Node<Erased>` and the alignment
/// of `Node<T>`. Its `next` and `prev` have the same offsets as in `Node<T>`
/// (`#[repr(C)]`), so only the links of the ghost node may ever be accessed.
struct Ghost<T> {
    node: NonNull<Node<T>>,
}

/// Nodes fragment cut out of a list, used in erasing, splicing and
/// swapping.
///
/// When detached from a list, reading of `front.prev` and `back.next`
/// is invalid. Dropping the fragment drops every node in `front..=back`.
pub(crate) struct DetachedNodes<T> {
    front: NonNull<Node<T>>,
    back: NonNull<Node<T>>,
    _marker: PhantomData<Box<Node<T>>>,
}

/// Link `prev` and `next` to each other.
///
/// It is unsafe because both pointers must point to live nodes (or ghost nodes).
pub(crate) unsafe fn connect<T>(prev: NonNull<Node<T>>, next: NonNull<Node<T>>) {
    (*prev.as_ptr()).next = next;
    (*next.as_ptr()).prev = prev;
}

pub(crate) unsafe fn next_node<T>(node: NonNull<Node<T>>) -> NonNull<Node<T>> {
    (*node.as_ptr()).next
}

pub(crate) unsafe fn prev_node<T>(node: NonNull<Node<T>>) -> NonNull<Node<T>> {
    (*node.as_ptr()).prev
}

/// Cut the run `front..=back` out of its ring, connecting its former neighbours.
///
/// `front.prev` and `back.next` are left untouched: the caller either links the
/// run somewhere else or drops it.
///
/// It is unsafe because it does not check whether `front..=back` is a valid range
/// of a ring (i.e. `front` must **NOT** be at the right of `back`, and the run
/// must not contain the ghost node).
pub(crate) unsafe fn cut<T>(front: NonNull<Node<T>>, back: NonNull<Node<T>>) {
    #[cfg(debug_assertions)]
    {
        assert_adjacent(prev_node(front), front);
        assert_adjacent(back, next_node(back));
    }
    connect(prev_node(front), next_node(back));
}

/// Link the detached run `front..=back` into a ring, right before `before`.
///
/// It is unsafe because it does not check whether `before` is linked into a ring,
/// or whether `front..=back` is really detached.
pub(crate) unsafe fn link<T>(
    front: NonNull<Node<T>>,
    back: NonNull<Node<T>>,
    before: NonNull<Node<T>>,
) {
    let prev = prev_node(before);
    #[cfg(debug_assertions)]
    assert_adjacent(prev, before);
    connect(prev, front);
    connect(back, before);
    #[cfg(debug_assertions)]
    {
        assert_adjacent(prev, front);
        assert_adjacent(back, before);
    }
}

/// Move the range `first..last` right before `before`. Nothing happens if the
/// range is empty.
///
/// It is unsafe because `first..last` must be a valid range of a ring, and `before`
/// must be linked into a ring, outside `first..last`.
pub(crate) unsafe fn move_nodes<T>(
    first: NonNull<Node<T>>,
    last: NonNull<Node<T>>,
    before: NonNull<Node<T>>,
) {
    if first == last {
        return;
    }
    let back = prev_node(last);
    cut(first, back);
    link(first, back, before);
}

// private methods
impl<T> List<T> {
    pub(crate) fn ghost_node(&self) -> NonNull<Node<T>> {
        self.ghost.node
    }
    pub(crate) fn front_node(&self) -> NonNull<Node<T>> {
        // SAFETY: `ghost.next` is always valid (either `ghost` itself, or the first element
        // in the list).
        unsafe { next_node(self.ghost_node()) }
    }
    pub(crate) fn back_node(&self) -> NonNull<Node<T>> {
        // SAFETY: `ghost.prev` is always valid (either `ghost` itself, or the last element
        // in the list).
        unsafe { prev_node(self.ghost_node()) }
    }

    /// Cut a range of nodes `front..=back` out of the list, and return the detached
    /// nodes.
    ///
    /// It is unsafe because it does not check whether `front..=back` is a valid range
    /// (i.e. `front` must **NOT** be at the right of `back`), or whether it belongs
    /// to the list.
    pub(crate) unsafe fn detach_nodes(
        &mut self,
        front: NonNull<Node<T>>,
        back: NonNull<Node<T>>,
    ) -> DetachedNodes<T> {
        debug_assert_ne!(front, self.ghost_node(), "Cannot detach the ghost node");
        cut(front, back);
        DetachedNodes::new(front, back)
    }

    /// Link a range of detached nodes into the list, right before `before`.
    ///
    /// It is unsafe because it does not check whether `before` belongs to the list.
    pub(crate) unsafe fn attach_nodes(&mut self, before: NonNull<Node<T>>, detached: DetachedNodes<T>) {
        let (front, back) = detached.into_raw();
        link(front, back, before);
    }

    /// Detach all nodes from the list, and return the detached nodes, or return
    /// `None` if the list is empty.
    ///
    /// It is safe because `self.front_node()..=self.back_node()` is a valid range.
    pub(crate) fn detach_all_nodes(&mut self) -> Option<DetachedNodes<T>> {
        if self.is_empty() {
            return None;
        }
        unsafe { Some(self.detach_nodes(self.front_node(), self.back_node())) }
    }
}

impl<T> List<T> {
    /// Create an empty `List`
    ///
    /// # Examples
    /// ```
    /// use ring_list::List;
    /// let list: List<u32> = List::new();
    /// assert!(list.is_empty());
    /// ```
    #[inline]
    pub fn new() -> Self {
        let ghost = Ghost::new();
        let _marker = PhantomData;
        Self { ghost, _marker }
    }

    /// Returns `true` if the `List` is empty.
    ///
    /// # Complexity
    ///
    /// This operation should compute in *O*(1) time.
    ///
    /// # Examples
    ///
    /// ```
    /// use ring_list::List;
    ///
    /// let mut list = List::new();
    /// assert!(list.is_empty());
    /// assert_eq!(list.begin(), list.end());
    ///
    /// list.push_front("foo");
    /// assert!(!list.is_empty());
    /// ```
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.front_node() == self.ghost_node()
    }

    /// Returns the length of the `List`.
    ///
    /// The list does not store its length, so that splicing stays *O*(1).
    ///
    /// # Complexity
    ///
    /// This operation should compute in *O*(*n*) time.
    ///
    /// # Examples
    ///
    /// ```
    /// use ring_list::List;
    ///
    /// let mut list = List::new();
    /// list.push_front(2);
    /// list.push_front(1);
    /// assert_eq!(list.len(), 2);
    /// ```
    pub fn len(&self) -> usize {
        self.iter().count()
    }

    /// Removes all elements from the `List`.
    ///
    /// # Complexity
    ///
    /// This operation should compute in *O*(*n*) time.
    ///
    /// # Examples
    ///
    /// ```
    /// use ring_list::List;
    ///
    /// let mut list = List::new();
    ///
    /// list.push_front(2);
    /// list.push_front(1);
    /// assert_eq!(list.front(), Some(&1));
    ///
    /// list.clear();
    /// assert_eq!(list.front(), None);
    /// assert_eq!(list.begin(), list.end());
    /// ```
    pub fn clear(&mut self) {
        // SAFETY: `begin()..end()` is always a valid range of the list.
        unsafe {
            self.erase_range(self.begin(), self.end());
        }
        debug_assert!(self.is_empty());
    }

    /// Provides a reference to the front element, or `None` if the list is
    /// empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use ring_list::List;
    ///
    /// let mut list = List::new();
    /// assert_eq!(list.front(), None);
    ///
    /// list.push_front(1);
    /// assert_eq!(list.front(), Some(&1));
    /// ```
    #[inline]
    pub fn front(&self) -> Option<&T> {
        if self.is_empty() {
            return None;
        }
        // SAFETY: the list is not empty, so the front node is an element node.
        unsafe { Some(self.begin().get()) }
    }

    /// Provides a mutable reference to the front element, or `None` if the list
    /// is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use ring_list::List;
    ///
    /// let mut list = List::new();
    /// list.push_front(1);
    ///
    /// if let Some(x) = list.front_mut() {
    ///     *x = 5;
    /// }
    /// assert_eq!(list.front(), Some(&5));
    /// ```
    #[inline]
    pub fn front_mut(&mut self) -> Option<&mut T> {
        if self.is_empty() {
            return None;
        }
        unsafe { Some(self.begin_mut().get_mut()) }
    }

    /// Provides a reference to the back element, or `None` if the list is
    /// empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use ring_list::List;
    ///
    /// let mut list = List::new();
    /// assert_eq!(list.back(), None);
    ///
    /// list.push_back(1);
    /// assert_eq!(list.back(), Some(&1));
    /// ```
    #[inline]
    pub fn back(&self) -> Option<&T> {
        if self.is_empty() {
            return None;
        }
        // SAFETY: the list is not empty, so the back node is an element node.
        unsafe { Some(self.end().prev().get()) }
    }

    /// Provides a mutable reference to the back element, or `None` if the list
    /// is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use ring_list::List;
    ///
    /// let mut list = List::new();
    /// list.push_back(1);
    ///
    /// if let Some(x) = list.back_mut() {
    ///     *x = 5;
    /// }
    /// assert_eq!(list.back(), Some(&5));
    /// ```
    #[inline]
    pub fn back_mut(&mut self) -> Option<&mut T> {
        if self.is_empty() {
            return None;
        }
        unsafe { Some(self.end_mut().prev().get_mut()) }
    }

    /// Adds an element first in the list.
    ///
    /// # Complexity
    ///
    /// This operation should compute in *O*(1) time.
    ///
    /// # Examples
    ///
    /// ```
    /// use ring_list::List;
    ///
    /// let mut list = List::new();
    ///
    /// list.push_front(2);
    /// assert_eq!(list.front().unwrap(), &2);
    ///
    /// list.push_front(1);
    /// assert_eq!(list.front().unwrap(), &1);
    /// ```
    pub fn push_front(&mut self, elt: T) {
        // SAFETY: `begin()` is always a valid position of the list.
        unsafe {
            self.insert(self.begin(), elt);
        }
    }

    /// Removes the first element and returns it, or `None` if the list is
    /// empty.
    ///
    /// # Complexity
    ///
    /// This operation should compute in *O*(1) time.
    ///
    /// # Examples
    ///
    /// ```
    /// use ring_list::List;
    ///
    /// let mut list = List::new();
    /// assert_eq!(list.pop_front(), None);
    ///
    /// list.push_front(1);
    /// list.push_front(3);
    /// assert_eq!(list.pop_front(), Some(3));
    /// assert_eq!(list.pop_front(), Some(1));
    /// assert_eq!(list.pop_front(), None);
    /// ```
    pub fn pop_front(&mut self) -> Option<T> {
        if self.is_empty() {
            return None;
        }
        // SAFETY: the list is not empty, so the front node is an element node.
        unsafe { Some(self.take_node(self.front_node())) }
    }

    /// Appends an element to the back of a list.
    ///
    /// # Complexity
    ///
    /// This operation should compute in *O*(1) time.
    ///
    /// # Examples
    ///
    /// ```
    /// use ring_list::List;
    ///
    /// let mut list = List::new();
    /// list.push_back(1);
    /// list.push_back(3);
    /// assert_eq!(list.back().unwrap(), &3);
    /// ```
    pub fn push_back(&mut self, elt: T) {
        // SAFETY: `end()` is always a valid position of the list.
        unsafe {
            self.insert(self.end(), elt);
        }
    }

    /// Removes the last element from a list and returns it, or `None` if
    /// it is empty.
    ///
    /// # Complexity
    ///
    /// This operation should compute in *O*(1) time.
    ///
    /// # Examples
    ///
    /// ```
    /// use ring_list::List;
    ///
    /// let mut list = List::new();
    /// assert_eq!(list.pop_back(), None);
    /// list.push_back(1);
    /// list.push_back(3);
    /// assert_eq!(list.pop_back(), Some(3));
    /// ```
    pub fn pop_back(&mut self) -> Option<T> {
        if self.is_empty() {
            return None;
        }
        // SAFETY: the list is not empty, so the back node is an element node.
        unsafe { Some(self.take_node(self.back_node())) }
    }

    /// Provides the position of the first element, or [`end`](List::end) if the
    /// list is empty.
    #[inline]
    pub fn begin(&self) -> Pos<T> {
        Pos::new(self.front_node())
    }

    /// Provides the position of the ghost node, one past the last element.
    ///
    /// This position never changes during the lifetime of the list.
    #[inline]
    pub fn end(&self) -> Pos<T> {
        Pos::new(self.ghost_node())
    }

    /// Like [`List::begin`], but the position allows mutating the element.
    #[inline]
    pub fn begin_mut(&mut self) -> PosMut<T> {
        PosMut::new(self.front_node())
    }

    /// Like [`List::end`], but the position allows mutating the element.
    #[inline]
    pub fn end_mut(&mut self) -> PosMut<T> {
        PosMut::new(self.ghost_node())
    }

    /// Inserts `elt` right before `pos`, and returns the position of the new
    /// element.
    ///
    /// No position is invalidated. If allocating the node panics, the list
    /// is left unchanged.
    ///
    /// # Complexity
    ///
    /// This operation should compute in *O*(1) time.
    ///
    /// # Safety
    ///
    /// `pos` must be a valid position of this list (possibly [`end`](List::end)).
    ///
    /// # Examples
    ///
    /// ```
    /// use ring_list::List;
    /// use std::iter::FromIterator;
    ///
    /// let mut list = List::from_iter([1, 2, 3, 4]);
    /// unsafe {
    ///     let three = list.begin().next().next();
    ///     let five = list.insert(three, 5);
    ///     assert_eq!(five.get(), &5);
    ///     assert_eq!(five.next(), three);
    /// }
    /// assert_eq!(Vec::from_iter(list), vec![1, 2, 5, 3, 4]);
    /// ```
    pub unsafe fn insert(&mut self, pos: impl Into<Pos<T>>, elt: T) -> PosMut<T> {
        let before = pos.into().node;
        // The node is fully built before the list is touched.
        let node = Node::new_detached(elt);
        link(node, node, before);
        PosMut::new(node)
    }

    /// Removes the element at `pos`, and returns the position following it.
    ///
    /// Only positions of the removed element are invalidated.
    ///
    /// # Complexity
    ///
    /// This operation should compute in *O*(1) time.
    ///
    /// # Safety
    ///
    /// `pos` must be a valid position of an element of this list; it must not be
    /// [`end`](List::end).
    ///
    /// # Examples
    ///
    /// ```
    /// use ring_list::List;
    /// use std::iter::FromIterator;
    ///
    /// let mut list = List::from_iter([1, 2, 3]);
    /// unsafe {
    ///     let next = list.erase(list.begin());
    ///     assert_eq!(next, list.begin());
    ///     assert_eq!(next.get(), &2);
    /// }
    /// assert_eq!(Vec::from_iter(list), vec![2, 3]);
    /// ```
    pub unsafe fn erase(&mut self, pos: impl Into<Pos<T>>) -> PosMut<T> {
        let pos = pos.into();
        self.erase_range(pos, pos.next())
    }

    /// Removes the elements in `first..last`, and returns `last`.
    ///
    /// Only positions of the removed elements are invalidated; `last` itself
    /// is untouched and is returned as is.
    ///
    /// # Complexity
    ///
    /// This operation should compute in *O*(*k*) time, where *k* is the number
    /// of removed elements.
    ///
    /// # Safety
    ///
    /// `first..last` must be a valid range of this list: both are valid positions
    /// of this list, and `last` is reachable from `first` without passing through
    /// [`end`](List::end) (`last` may be `end` itself).
    ///
    /// # Examples
    ///
    /// ```
    /// use ring_list::List;
    /// use std::iter::FromIterator;
    ///
    /// let mut list = List::from_iter([1, 2, 3, 4, 5]);
    /// unsafe {
    ///     let first = list.begin().next();
    ///     let last = first.next().next();
    ///     assert_eq!(list.erase_range(first, last), last);
    /// }
    /// assert_eq!(Vec::from_iter(list), vec![1, 4, 5]);
    /// ```
    pub unsafe fn erase_range(
        &mut self,
        first: impl Into<Pos<T>>,
        last: impl Into<Pos<T>>,
    ) -> PosMut<T> {
        let (first, last) = (first.into().node, last.into().node);
        if first != last {
            drop(self.detach_nodes(first, prev_node(last)));
        }
        PosMut::new(last)
    }

    /// Moves the elements `first..last` of `other` right before `pos` of this list.
    ///
    /// No element is moved, copied or dropped, and no position is invalidated:
    /// the positions of the moved elements now point into this list.
    ///
    /// Nothing happens if `first == last`.
    ///
    /// # Complexity
    ///
    /// This operation should compute in *O*(1) time and *O*(1) memory.
    ///
    /// # Safety
    ///
    /// - `pos` must be a valid position of this list (possibly [`end`](List::end));
    /// - `first..last` must be a valid range of `other`
    ///   (see [`erase_range`](List::erase_range)).
    ///
    /// # Examples
    ///
    /// ```
    /// use ring_list::List;
    /// use std::iter::FromIterator;
    ///
    /// let mut a = List::from_iter([1, 2, 3, 4]);
    /// let mut b = List::from_iter([5, 6, 7, 8]);
    /// unsafe {
    ///     let first = b.begin();
    ///     let last = first.next().next();
    ///     a.splice(a.begin(), &mut b, first, last);
    ///     // `first` still points to 5, which now lives in `a`.
    ///     assert_eq!(first, a.begin());
    /// }
    /// assert_eq!(Vec::from_iter(a), vec![5, 6, 1, 2, 3, 4]);
    /// assert_eq!(Vec::from_iter(b), vec![7, 8]);
    /// ```
    pub unsafe fn splice(
        &mut self,
        pos: impl Into<Pos<T>>,
        other: &mut List<T>,
        first: impl Into<Pos<T>>,
        last: impl Into<Pos<T>>,
    ) {
        let (first, last) = (first.into().node, last.into().node);
        debug_assert!(
            first == last || first != other.ghost_node(),
            "Cannot splice the ghost node of another list"
        );
        move_nodes(first, last, pos.into().node);
    }

    /// Moves the elements `first..last` of this list right before `pos`.
    ///
    /// This is [`splice`](List::splice) where the source list is the list itself.
    ///
    /// # Complexity
    ///
    /// This operation should compute in *O*(1) time and *O*(1) memory.
    ///
    /// # Safety
    ///
    /// - `first..last` must be a valid range of this list
    ///   (see [`erase_range`](List::erase_range));
    /// - `pos` must be a valid position of this list, and must **NOT** be inside
    ///   `first..last` (it may be `last`).
    ///
    /// # Examples
    ///
    /// ```
    /// use ring_list::List;
    /// use std::iter::FromIterator;
    ///
    /// let mut list = List::from_iter([1, 2, 3, 4, 5]);
    /// unsafe {
    ///     let pos = list.begin().next();
    ///     let first = pos.next();
    ///     let last = list.end().prev();
    ///     list.splice_within(pos, first, last);
    /// }
    /// assert_eq!(Vec::from_iter(list), vec![1, 3, 4, 2, 5]);
    /// ```
    pub unsafe fn splice_within(
        &mut self,
        pos: impl Into<Pos<T>>,
        first: impl Into<Pos<T>>,
        last: impl Into<Pos<T>>,
    ) {
        let (pos, first, last) = (pos.into().node, first.into().node, last.into().node);
        #[cfg(debug_assertions)]
        assert_outside(pos, first, last);
        move_nodes(first, last, pos);
    }

    /// Exchanges the elements of two lists.
    ///
    /// The ghost nodes stay with their lists, so [`end`](List::end) of each list
    /// is unchanged. Positions of elements stay valid, and refer to the same
    /// elements, now owned by the other list.
    ///
    /// # Complexity
    ///
    /// This operation should compute in *O*(1) time and *O*(1) memory.
    ///
    /// # Examples
    ///
    /// ```
    /// use ring_list::List;
    /// use std::iter::FromIterator;
    ///
    /// let mut a = List::from_iter([1, 2]);
    /// let mut b = List::from_iter([3]);
    /// let one = a.begin();
    ///
    /// a.swap(&mut b);
    /// assert_eq!(one, b.begin());
    /// assert_eq!(Vec::from_iter(a), vec![3]);
    /// assert_eq!(Vec::from_iter(b), vec![1, 2]);
    /// ```
    pub fn swap(&mut self, other: &mut Self) {
        let mine = self.detach_all_nodes();
        let theirs = other.detach_all_nodes();
        // SAFETY: both lists are empty now, and the ghost nodes belong to them.
        unsafe {
            if let Some(detached) = theirs {
                self.attach_nodes(self.ghost_node(), detached);
            }
            if let Some(detached) = mine {
                other.attach_nodes(other.ghost_node(), detached);
            }
        }
    }

    /// Moves all elements from `other` to the end of the list.
    ///
    /// This reuses all the nodes from `other` and moves them into `self`. After
    /// this operation, `other` becomes empty.
    ///
    /// # Complexity
    ///
    /// This operation should compute in *O*(1) time and *O*(1) memory.
    ///
    /// # Examples
    ///
    /// ```
    /// use ring_list::List;
    ///
    /// let mut list1 = List::new();
    /// list1.push_back('a');
    ///
    /// let mut list2 = List::new();
    /// list2.push_back('b');
    /// list2.push_back('c');
    ///
    /// list1.append(&mut list2);
    ///
    /// let mut iter = list1.iter();
    /// assert_eq!(iter.next(), Some(&'a'));
    /// assert_eq!(iter.next(), Some(&'b'));
    /// assert_eq!(iter.next(), Some(&'c'));
    /// assert!(iter.next().is_none());
    ///
    /// assert!(list2.is_empty());
    /// ```
    pub fn append(&mut self, other: &mut Self) {
        // SAFETY: `end()` is a valid position of `self`, and `begin()..end()`
        // is a valid range of `other`.
        unsafe { self.splice(self.end(), other, other.begin(), other.end()) }
    }

    /// Moves all elements from `other` to the begin of the list.
    ///
    /// This reuses all the nodes from `other` and moves them into `self`. After
    /// this operation, `other` becomes empty.
    ///
    /// # Complexity
    ///
    /// This operation should compute in *O*(1) time and *O*(1) memory.
    ///
    /// # Examples
    ///
    /// ```
    /// use ring_list::List;
    ///
    /// let mut list1 = List::new();
    /// list1.push_back('a');
    ///
    /// let mut list2 = List::new();
    /// list2.push_back('b');
    /// list2.push_back('c');
    ///
    /// list2.prepend(&mut list1);
    ///
    /// let mut iter = list2.iter();
    /// assert_eq!(iter.next(), Some(&'a'));
    /// assert_eq!(iter.next(), Some(&'b'));
    /// assert_eq!(iter.next(), Some(&'c'));
    /// assert!(iter.next().is_none());
    ///
    /// assert!(list1.is_empty());
    /// ```
    pub fn prepend(&mut self, other: &mut Self) {
        // SAFETY: `begin()` is a valid position of `self`, and `begin()..end()`
        // is a valid range of `other`.
        unsafe { self.splice(self.begin(), other, other.begin(), other.end()) }
    }

    /// Provides a forward iterator.
    ///
    /// # Examples
    ///
    /// ```
    /// use ring_list::List;
    ///
    /// let mut list = List::new();
    ///
    /// list.push_back(0);
    /// list.push_back(1);
    /// list.push_back(2);
    ///
    /// let mut iter = list.iter();
    /// assert_eq!(iter.next(), Some(&0));
    /// assert_eq!(iter.next(), Some(&1));
    /// assert_eq!(iter.next(), Some(&2));
    /// assert_eq!(iter.next(), None);
    /// ```
    #[inline]
    pub fn iter(&self) -> Iter<'_, T> {
        Iter::new(self.front_node(), self.ghost_node())
    }

    /// Provides a forward iterator with mutable references.
    ///
    /// # Examples
    ///
    /// ```
    /// use ring_list::List;
    ///
    /// let mut list = List::new();
    ///
    /// list.push_back(0);
    /// list.push_back(1);
    /// list.push_back(2);
    ///
    /// for element in list.iter_mut() {
    ///     *element += 10;
    /// }
    ///
    /// let mut iter = list.iter();
    /// assert_eq!(iter.next(), Some(&10));
    /// assert_eq!(iter.next(), Some(&11));
    /// assert_eq!(iter.next(), Some(&12));
    /// assert_eq!(iter.next(), None);
    /// ```
    #[inline]
    pub fn iter_mut(&mut self) -> IterMut<'_, T> {
        IterMut::new(self.front_node(), self.ghost_node())
    }

    /// Provides a forward iterator over the elements in `first..last`.
    ///
    /// # Safety
    ///
    /// `first..last` must be a valid range of this list
    /// (see [`erase_range`](List::erase_range)).
    ///
    /// # Examples
    ///
    /// ```
    /// use ring_list::List;
    /// use std::iter::FromIterator;
    ///
    /// let list = List::from_iter([1, 2, 3, 4]);
    /// let middle = unsafe { list.range(list.begin().next(), list.end().prev()) };
    /// assert_eq!(Vec::from_iter(middle.rev()), vec![&3, &2]);
    /// ```
    pub unsafe fn range(&self, first: impl Into<Pos<T>>, last: impl Into<Pos<T>>) -> Iter<'_, T> {
        Iter::new(first.into().node, last.into().node)
    }

    /// Cut a single element node out of the list, free it and return its element.
    unsafe fn take_node(&mut self, node: NonNull<Node<T>>) -> T {
        let detached = self.detach_nodes(node, node);
        let (front, _) = detached.into_raw();
        Node::into_element(front)
    }
}

impl<T: Debug> Debug for List<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<T> Default for List<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Node<T> {
    /// Create a detached node with given element.
    ///
    /// `node.prev` and `node.next` are dangling until the node is linked.
    pub(crate) fn new_detached(element: T) -> NonNull<Node<T>> {
        let node = Box::new(Node {
            next: NonNull::dangling(),
            prev: NonNull::dangling(),
            element,
        });
        NonNull::from(Box::leak(node))
    }

    /// Free a detached node and return its element.
    ///
    /// It is unsafe because `node` must have been created by [`Node::new_detached`]
    /// and must not be linked into any ring anymore.
    pub(crate) unsafe fn into_element(node: NonNull<Node<T>>) -> T {
        Box::from_raw(node.as_ptr()).element
    }
}

impl<T> Ghost<T> {
    fn layout() -> Layout {
        Layout::new::<Node<Erased>>()
            .align_to(mem::align_of::<Node<T>>())
            .expect("the alignment of a type is always a power of two")
    }

    fn new() -> Self {
        let layout = Self::layout();
        // SAFETY: the layout is not zero-sized, it holds two pointers.
        let node = match NonNull::new(unsafe { alloc::alloc(layout) }) {
            Some(ptr) => ptr.cast(),
            None => alloc::handle_alloc_error(layout),
        };
        // SAFETY: only the links are written, linking the node to itself forms
        // an empty ring.
        unsafe { connect(node, node) };
        Self { node }
    }
}

impl<T> Drop for Ghost<T> {
    fn drop(&mut self) {
        // SAFETY: the ghost node is allocated by `Ghost::new` with the same layout.
        unsafe { alloc::dealloc(self.node.as_ptr().cast(), Self::layout()) }
    }
}

impl<T> DetachedNodes<T> {
    /// If is unsafe because it must be guaranteed that `front..=back` is
    /// a valid run of element nodes, already cut out of its ring.
    unsafe fn new(front: NonNull<Node<T>>, back: NonNull<Node<T>>) -> Self {
        let _marker = PhantomData;
        Self {
            front,
            back,
            _marker,
        }
    }

    /// Give up the ownership of the nodes without dropping them.
    fn into_raw(self) -> (NonNull<Node<T>>, NonNull<Node<T>>) {
        let (front, back) = (self.front, self.back);
        mem::forget(self);
        (front, back)
    }
}

impl<T> Drop for DetachedNodes<T> {
    fn drop(&mut self) {
        let mut rest = FreeGuard {
            next: Some(self.front),
            back: self.back,
        };
        while let Some(element) = rest.next() {
            drop(element);
        }
    }
}

/// The nodes of a fragment that are not freed yet.
///
/// If an element destructor panics, dropping the guard during unwinding frees
/// the rest of the fragment. If another one panics this will abort.
struct FreeGuard<T> {
    next: Option<NonNull<Node<T>>>,
    back: NonNull<Node<T>>,
}

impl<T> Iterator for FreeGuard<T> {
    type Item = T;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.next?;
        self.next = if node == self.back {
            None
        } else {
            // SAFETY: `node` is not the back node, so `node.next` is in the fragment.
            Some(unsafe { next_node(node) })
        };
        // SAFETY: `node` belongs to the fragment and is never visited again.
        Some(unsafe { Node::into_element(node) })
    }
}

impl<T> Drop for FreeGuard<T> {
    fn drop(&mut self) {
        self.for_each(drop);
    }
}

#[cfg(debug_assertions)]
fn assert_adjacent<T>(prev: NonNull<Node<T>>, next: NonNull<Node<T>>) {
    unsafe {
        assert_eq!(next_node(prev), next);
        assert_eq!(prev_node(next), prev);
    }
}

/// Assert that `pos` is not inside `first..last`.
#[cfg(debug_assertions)]
unsafe fn assert_outside<T>(pos: NonNull<Node<T>>, mut first: NonNull<Node<T>>, last: NonNull<Node<T>>) {
    while first != last {
        assert_ne!(first, pos, "Cannot splice a range into itself");
        first = next_node(first);
    }
}

impl<T> Drop for List<T> {
    fn drop(&mut self) {
        self.clear();
    }
}

// SAFETY: the list exclusively owns its nodes, and positions into it are `!Send`.
unsafe impl<T: Send> Send for List<T> {}

// SAFETY: `&List<T>` only gives out `&T` and read-only iterators.
unsafe impl<T: Sync> Sync for List<T> {}

// Ensure that `List` and its read-only iterators are covariant in their type parameters.
#[allow(dead_code)]
fn assert_covariance() {
    fn a<'a>(x: List<&'static str>) -> List<&'a str> {
        x
    }
    fn b<'i, 'a>(x: Iter<'i, &'static str>) -> Iter<'i, &'a str> {
        x
    }
    fn c<'a>(x: IntoIter<&'static str>) -> IntoIter<&'a str> {
        x
    }
}
