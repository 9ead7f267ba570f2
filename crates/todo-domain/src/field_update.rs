/// Three-way change for an optional field in a partial update.
///
/// `NoChange` keeps the current value, `Set` replaces it and `Clear`
/// removes it. Plain `Option<T>` cannot tell "leave alone" from "remove".
///
/// ```
/// use todo_domain::FieldUpdate;
///
/// let mut due = Some(3);
/// FieldUpdate::NoChange.apply_to(&mut due);
/// assert_eq!(due, Some(3));
/// FieldUpdate::Clear.apply_to(&mut due);
/// assert_eq!(due, None);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldUpdate<T> {
    NoChange,
    Set(T),
    Clear,
}

impl<T> Default for FieldUpdate<T> {
    fn default() -> Self {
        FieldUpdate::NoChange
    }
}

impl<T> FieldUpdate<T> {
    pub fn apply_to(self, field: &mut Option<T>) {
        match self {
            FieldUpdate::NoChange => {}
            FieldUpdate::Set(value) => *field = Some(value),
            FieldUpdate::Clear => *field = None,
        }
    }
}

impl FieldUpdate<String> {
    /// Form-style input: absent means untouched, blank means clear.
    ///
    /// ```
    /// use todo_domain::FieldUpdate;
    ///
    /// assert_eq!(FieldUpdate::from_input(None), FieldUpdate::NoChange);
    /// assert_eq!(FieldUpdate::from_input(Some("  ")), FieldUpdate::Clear);
    /// assert_eq!(
    ///     FieldUpdate::from_input(Some(" x ")),
    ///     FieldUpdate::Set("x".to_string())
    /// );
    /// ```
    pub fn from_input(input: Option<&str>) -> Self {
        match input.map(str::trim) {
            None => FieldUpdate::NoChange,
            Some("") => FieldUpdate::Clear,
            Some(text) => FieldUpdate::Set(text.to_string()),
        }
    }
}
