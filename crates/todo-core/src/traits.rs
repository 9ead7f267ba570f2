/// A form-shaped view of an entity: pre-filled from the entity for editing,
/// then written back.
pub trait Editable<T>: Sized {
    fn from_entity(entity: &T) -> Self;
    fn apply_to(self, entity: &mut T);
}
