use std::cmp::Ordering;

/// The per-record capabilities an [`OrderedIndex`](crate::OrderedIndex) is
/// parameterized with.
///
/// A record carries its own key. The index never inspects a record except
/// through this trait, so one tree implementation serves any record type:
///
/// - [`Record::compare`] orders a probe key against a stored record,
/// - [`Record::construct`] builds a fresh record for a key that is not yet
///   present,
/// - [`Record::assign`] moves the contents of one record into another when a
///   node with two children is deleted,
/// - destruction is the record's `Drop` implementation, run exactly once per
///   record when it is deleted, cleared or the index is dropped.
///
/// `compare` must be a total order that agrees with [`Record::key`]: for any
/// record `r`, `Self::compare(r.key(), r)` is [`Ordering::Equal`].
pub trait Record: Sized {
    /// The lookup key. Usually borrowed from the record itself.
    type Key: ?Sized;

    /// Returns how `key` orders relative to the key of `record`.
    fn compare(key: &Self::Key, record: &Self) -> Ordering;

    /// Creates the record stored for a newly inserted `key`.
    fn construct(key: &Self::Key) -> Self;

    /// Returns the key this record is stored under.
    fn key(&self) -> &Self::Key;

    /// Replaces the contents of `self` with `src`. The previous contents are
    /// destroyed.
    fn assign(&mut self, src: Self) {
        *self = src;
    }
}

impl Record for String {
    type Key = str;

    #[inline]
    fn compare(key: &str, record: &String) -> Ordering {
        key.cmp(record.as_str())
    }

    fn construct(key: &str) -> String {
        key.to_owned()
    }

    #[inline]
    fn key(&self) -> &str {
        self.as_str()
    }
}

macro_rules! impl_record_for_ord_copy {
    ($($ty:ty),*) => {
        $(
            impl Record for $ty {
                type Key = $ty;

                #[inline]
                fn compare(key: &$ty, record: &$ty) -> Ordering {
                    key.cmp(record)
                }

                #[inline]
                fn construct(key: &$ty) -> $ty {
                    *key
                }

                #[inline]
                fn key(&self) -> &$ty {
                    self
                }
            }
        )*
    };
}

impl_record_for_ord_copy!(u8, u16, u32, u64, usize, i8, i16, i32, i64, isize, char);
