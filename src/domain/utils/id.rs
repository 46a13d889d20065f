use std::fmt;
use std::marker::PhantomData;

/// Numeric identifier tagged with the kind of entity it names, so a mote id can never be
/// passed where a link id is expected.
#[derive(PartialEq, Eq, PartialOrd, Ord, Clone, Copy, Hash)]
pub struct Id<T> {
    pub id: u32,
    _marker: PhantomData<T>,
}

impl<T> Id<T> {
    pub const fn new(id: u32) -> Self {
        Id { id, _marker: PhantomData }
    }
}

impl<T> fmt::Display for Id<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.id)
    }
}

impl<T> From<u32> for Id<T> {
    fn from(id: u32) -> Self {
        Id::new(id)
    }
}

impl<T> From<Id<T>> for u32 {
    fn from(id_wrapper: Id<T>) -> Self {
        id_wrapper.id
    }
}

impl<T> fmt::Debug for Id<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let full_name = std::any::type_name::<T>();
        let clean_name = full_name.split("::").last().unwrap_or(full_name);
        let display_name = clean_name.replace("Tag", "Id");

        write!(f, "{}: {}", display_name, self.id)
    }
}

#[derive(Debug, PartialEq, Eq, PartialOrd, Ord, Clone, Hash, Copy)]
pub struct MoteTag;
#[derive(Debug, PartialEq, Eq, PartialOrd, Ord, Clone, Hash, Copy)]
pub struct LinkTag;

pub type MoteId = Id<MoteTag>;
pub type LinkId = Id<LinkTag>;
