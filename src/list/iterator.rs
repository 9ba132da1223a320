use crate::list::{next_node, prev_node, List, Node};
use std::fmt;
use std::iter::{FromIterator, FusedIterator};
use std::marker::PhantomData;
use std::ptr::NonNull;

/// The nodes `start..end` a borrowing iterator has not yielded yet.
///
/// `start..end` is a valid range of a list: walking forward from `start` reaches
/// `end` without passing the ghost node (unless `end` is the ghost node).
struct Remaining<T> {
    start: NonNull<Node<T>>,
    end: NonNull<Node<T>>,
}

impl<T> Clone for Remaining<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Remaining<T> {}

impl<T> Remaining<T> {
    /// Take the node at the front, shrinking the range to `start.next..end`.
    fn take_front(&mut self) -> Option<NonNull<Node<T>>> {
        if self.start == self.end {
            return None;
        }
        let node = self.start;
        // SAFETY: the range is not empty, so `start` is an element node.
        self.start = unsafe { next_node(node) };
        Some(node)
    }

    /// Take the node at the back, shrinking the range to `start..end.prev`.
    fn take_back(&mut self) -> Option<NonNull<Node<T>>> {
        if self.start == self.end {
            return None;
        }
        // SAFETY: the range is not empty, so `end.prev` is an element node.
        self.end = unsafe { prev_node(self.end) };
        Some(self.end)
    }

    fn debug_elements(mut self, name: &str, f: &mut fmt::Formatter<'_>) -> fmt::Result
    where
        T: fmt::Debug,
    {
        let mut f = f.debug_tuple(name);
        while let Some(node) = self.take_front() {
            // SAFETY: element nodes of the range stay alive while it is borrowed.
            f.field(unsafe { &(*node.as_ptr()).element });
        }
        f.finish()
    }
}

/// An iterator over the elements of a `List`.
///
/// It is created by [`List::iter`], or by [`List::range`] for a part of the
/// list. It walks the half-open range `start..end`, from both ends.
///
/// Unlike a position, an `Iter` borrows the list, so the list cannot be changed
/// while the iterator is alive:
///
/// ```compile_fail
/// use ring_list::List;
/// use std::iter::FromIterator;
///
/// let mut list = List::from_iter([1, 2, 3]);
/// let mut iter = list.iter();
///
/// list.push_back(4);
/// println!("{:?}", iter.next());
/// ```
pub struct Iter<'a, T: 'a> {
    nodes: Remaining<T>,
    _marker: PhantomData<&'a List<T>>,
}

impl<'a, T: 'a> Iter<'a, T> {
    /// It is the caller's duty to make sure `start..end` is a valid range of a list
    /// that outlives `'a`.
    pub(crate) fn new(start: NonNull<Node<T>>, end: NonNull<Node<T>>) -> Self {
        Self {
            nodes: Remaining { start, end },
            _marker: PhantomData,
        }
    }
}

impl<T> Clone for Iter<'_, T> {
    fn clone(&self) -> Self {
        Self {
            nodes: self.nodes,
            _marker: PhantomData,
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for Iter<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.nodes.debug_elements("Iter", f)
    }
}

impl<'a, T: 'a> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        // SAFETY: the list is borrowed for `'a`, so its element nodes outlive `'a`.
        self.nodes
            .take_front()
            .map(|node| unsafe { &(*node.as_ptr()).element })
    }

    fn last(mut self) -> Option<Self::Item> {
        self.next_back()
    }
}

impl<'a, T: 'a> DoubleEndedIterator for Iter<'a, T> {
    fn next_back(&mut self) -> Option<Self::Item> {
        // SAFETY: the list is borrowed for `'a`, so its element nodes outlive `'a`.
        self.nodes
            .take_back()
            .map(|node| unsafe { &(*node.as_ptr()).element })
    }
}

impl<'a, T: 'a> FusedIterator for Iter<'a, T> {}

/// An iterator over mutable references to the elements of a `List`.
///
/// It is created by [`List::iter_mut`]. The elements can be changed through it,
/// but not the links between them. The list is borrowed mutably, so it cannot
/// even be read while the iterator is alive:
///
/// ```compile_fail
/// use ring_list::List;
/// use std::iter::FromIterator;
///
/// let mut list = List::from_iter([1, 2, 3]);
/// let mut iter = list.iter_mut();
/// println!("{:?}", list.back());
/// println!("{:?}", iter.next());
/// ```
pub struct IterMut<'a, T: 'a> {
    nodes: Remaining<T>,
    _marker: PhantomData<&'a mut List<T>>,
}

impl<'a, T: 'a> IterMut<'a, T> {
    pub(crate) fn new(start: NonNull<Node<T>>, end: NonNull<Node<T>>) -> Self {
        Self {
            nodes: Remaining { start, end },
            _marker: PhantomData,
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for IterMut<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.nodes.debug_elements("IterMut", f)
    }
}

impl<'a, T: 'a> Iterator for IterMut<'a, T> {
    type Item = &'a mut T;

    fn next(&mut self) -> Option<Self::Item> {
        // SAFETY: the list is borrowed mutably for `'a`, and each node is taken
        // out of the range once, so no two references alias.
        self.nodes
            .take_front()
            .map(|node| unsafe { &mut (*node.as_ptr()).element })
    }

    fn last(mut self) -> Option<Self::Item> {
        self.next_back()
    }
}

impl<'a, T: 'a> DoubleEndedIterator for IterMut<'a, T> {
    fn next_back(&mut self) -> Option<Self::Item> {
        // SAFETY: see `next`.
        self.nodes
            .take_back()
            .map(|node| unsafe { &mut (*node.as_ptr()).element })
    }
}

impl<'a, T: 'a> FusedIterator for IterMut<'a, T> {}

/// An owning iterator over the elements of a `List`, created by
/// `List::into_iter`. Elements not yielded are dropped with the iterator.
pub struct IntoIter<T> {
    list: List<T>,
}

impl<T: fmt::Debug> fmt::Debug for IntoIter<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("IntoIter").field(&self.list).finish()
    }
}

impl<T> Iterator for IntoIter<T> {
    type Item = T;

    fn next(&mut self) -> Option<Self::Item> {
        self.list.pop_front()
    }

    fn last(mut self) -> Option<Self::Item> {
        self.next_back()
    }
}

impl<T> DoubleEndedIterator for IntoIter<T> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.list.pop_back()
    }
}

impl<T> FusedIterator for IntoIter<T> {}

impl<T> IntoIterator for List<T> {
    type Item = T;
    type IntoIter = IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        IntoIter { list: self }
    }
}

impl<'a, T> IntoIterator for &'a List<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a, T> IntoIterator for &'a mut List<T> {
    type Item = &'a mut T;
    type IntoIter = IterMut<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter_mut()
    }
}

impl<T> FromIterator<T> for List<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut list = List::new();
        list.extend(iter);
        list
    }
}

/// Elements are pushed at the back, in order.
impl<T> Extend<T> for List<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for elt in iter {
            self.push_back(elt);
        }
    }
}

/// Copies the elements to the back of the list.
///
/// ```
/// use ring_list::List;
/// use std::iter::FromIterator;
///
/// let mut list = List::from([1, 2]);
/// list.extend(&[3, 4]);
/// assert_eq!(Vec::from_iter(list), vec![1, 2, 3, 4]);
/// ```
impl<'a, T: 'a + Copy> Extend<&'a T> for List<T> {
    fn extend<I: IntoIterator<Item = &'a T>>(&mut self, iter: I) {
        self.extend(iter.into_iter().copied())
    }
}

impl<T> From<Vec<T>> for List<T> {
    fn from(vec: Vec<T>) -> Self {
        vec.into_iter().collect()
    }
}

/// ```
/// use ring_list::List;
///
/// let list = List::from(['a', 'b']);
/// assert_eq!(list.front(), Some(&'a'));
/// assert_eq!(list.back(), Some(&'b'));
/// ```
impl<T, const N: usize> From<[T; N]> for List<T> {
    fn from(array: [T; N]) -> Self {
        Self::from_iter(array)
    }
}

unsafe impl<T: Sync> Send for Iter<'_, T> {}

unsafe impl<T: Sync> Sync for Iter<'_, T> {}

unsafe impl<T: Send> Send for IterMut<'_, T> {}

unsafe impl<T: Sync> Sync for IterMut<'_, T> {}

#[cfg(test)]
mod tests {
    use crate::test_utils::{Element, NoNewInstancesGuard};
    use crate::List;
    use std::iter::FromIterator;

    fn list_of(elems: &[i32]) -> List<Element> {
        elems.iter().map(|&e| Element::new(e)).collect()
    }

    #[test]
    fn iter_both_ends() {
        let _guard = NoNewInstancesGuard::new();
        let list = list_of(&[1, 2, 3, 4, 5]);
        assert!(list.iter().map(Element::value).eq(1..=5));
        assert!(list.iter().rev().map(Element::value).eq((1..=5).rev()));

        let mut iter = list.iter();
        assert_eq!(iter.next().unwrap(), &1);
        assert_eq!(iter.next_back().unwrap(), &5);
        assert_eq!(iter.next().unwrap(), &2);
        assert_eq!(iter.next_back().unwrap(), &4);
        assert_eq!(iter.next().unwrap(), &3);
        // The two ends met: fused from both sides.
        assert!(iter.next().is_none());
        assert!(iter.next_back().is_none());
        assert!(iter.next().is_none());

        assert_eq!(list.iter().last().unwrap(), &5);
        assert!(List::<Element>::new().iter().next().is_none());
    }

    #[test]
    fn iter_clone_resumes_independently() {
        struct NotClone(i32);
        let list = List::from_iter((1..=4).map(NotClone));
        let mut iter = list.iter();
        iter.next();
        let saved = iter.clone();
        assert_eq!(iter.map(|e| e.0).sum::<i32>(), 9);
        assert!(saved.rev().map(|e| e.0).eq(vec![4, 3, 2]));
    }

    #[test]
    fn iter_mut_replaces_elements() {
        let _guard = NoNewInstancesGuard::new();
        let mut list = list_of(&[1, 2, 3, 4]);
        for (i, elt) in list.iter_mut().rev().enumerate() {
            *elt = Element::new(elt.value() * 10 + i as i32);
        }
        assert!(list.iter().map(Element::value).eq(vec![13, 22, 31, 40]));

        let mut iter = list.iter_mut();
        *iter.next_back().unwrap() = Element::new(0);
        *iter.next().unwrap() = Element::new(0);
        assert!(list.iter().map(Element::value).eq(vec![0, 22, 31, 0]));
    }

    #[test]
    fn into_iter_drops_the_rest() {
        let _guard = NoNewInstancesGuard::new();
        let mut iter = list_of(&[1, 2, 3, 4, 5]).into_iter();
        assert_eq!(iter.next().unwrap(), 1);
        assert_eq!(iter.next_back().unwrap(), 5);
        assert_eq!(format!("{:?}", iter), "IntoIter([2, 3, 4])");
        drop(iter);

        assert_eq!(list_of(&[1, 2, 3]).into_iter().last().unwrap(), 3);
        let values: Vec<i32> = list_of(&[7, 8]).into_iter().map(|e| e.value()).collect();
        assert_eq!(values, vec![7, 8]);
    }

    #[test]
    fn range_after_splices() {
        let _guard = NoNewInstancesGuard::new();
        let mut list = list_of(&[1, 2, 3]);
        let mut other = list_of(&[10, 20, 30, 40]);
        unsafe {
            let first = other.begin().next();
            let last = other.end().prev();
            list.splice(list.begin().next(), &mut other, first, last);
            let (first, last) = (other.begin(), other.end());
            list.splice(list.end(), &mut other, first, last);
        }
        let expected = [1, 20, 30, 2, 3, 10, 40];
        assert!(other.is_empty());

        let mut positions = Vec::new();
        let mut pos = list.begin();
        for _ in 0..=expected.len() {
            positions.push(pos);
            pos = unsafe { pos.next() };
        }
        assert_eq!(positions[expected.len()], list.end());

        for i in 0..positions.len() {
            for j in i..positions.len() {
                let forward: Vec<i32> = unsafe { list.range(positions[i], positions[j]) }
                    .map(Element::value)
                    .collect();
                let mut backward: Vec<i32> = unsafe { list.range(positions[i], positions[j]) }
                    .rev()
                    .map(Element::value)
                    .collect();
                backward.reverse();
                assert_eq!(forward, &expected[i..j]);
                assert_eq!(forward, backward);
            }
        }
    }

    #[test]
    fn collect_and_extend() {
        let mut list: List<i32> = (1..=3).collect();
        list.extend(vec![4, 5]);
        list.extend(&[6]);
        assert_eq!(Vec::from_iter(&list), vec![&1, &2, &3, &4, &5, &6]);
        assert_eq!(List::from([1, 2, 3]), List::from(vec![1, 2, 3]));
        assert!(List::from([0; 0]).is_empty());

        let mut total = 0;
        for elt in &mut list {
            *elt *= 2;
            total += *elt;
        }
        assert_eq!(total, 42);
    }

    #[test]
    fn iter_debug() {
        let mut list = List::from(vec![1, 2]);
        assert_eq!(format!("{:?}", list), "[1, 2]");
        assert_eq!(format!("{:?}", list.iter()), "Iter(1, 2)");
        assert_eq!(format!("{:?}", list.iter_mut()), "IterMut(1, 2)");
        let mut iter = list.iter();
        iter.next();
        assert_eq!(format!("{:?}", iter), "Iter(2)");
    }
}
