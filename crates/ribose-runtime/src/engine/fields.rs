//! Field store: named growable byte buffers and the current-selection
//! register.
//!
//! Fields are append-only except for explicit `clear`/`cut` (`spec.md`
//! §4.2). Exactly one field is selected at a time; effectors that write
//! field content (`paste`, `copy`, …) always target the selected field.
//! Field 0 is the anonymous field and always exists.

use super::error::EffectorError;

/// One field's accumulated byte content.
#[derive(Clone, Debug, Default)]
pub struct Field {
    data: Vec<u8>,
}

impl Field {
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    pub fn as_utf8(&self) -> Result<&str, EffectorError> {
        std::str::from_utf8(&self.data).map_err(|_| EffectorError::Custom("field is not valid UTF-8".into()))
    }

    /// Decode the field's content as a UTF-8 decimal integer.
    pub fn as_i64(&self) -> Result<i64, EffectorError> {
        let text = self.as_utf8()?;
        text.trim().parse().map_err(|_| EffectorError::NotANumber {
            effector: "<field>".into(),
            value: text.to_string(),
        })
    }

    /// Decode the field's content as a UTF-8 floating-point number.
    pub fn as_f64(&self) -> Result<f64, EffectorError> {
        let text = self.as_utf8()?;
        text.trim().parse().map_err(|_| EffectorError::NotANumber {
            effector: "<field>".into(),
            value: text.to_string(),
        })
    }
}

/// The transductor's field bank plus the current-selection register.
#[derive(Clone, Debug)]
pub struct FieldStore {
    fields: Vec<Field>,
    selected: u16,
}

impl FieldStore {
    /// Create a store with `count` fields (including the anonymous field
    /// at ordinal 0), all empty, with field 0 selected.
    pub fn new(count: usize) -> Self {
        Self { fields: vec![Field::default(); count.max(1)], selected: 0 }
    }

    pub fn selected(&self) -> u16 {
        self.selected
    }

    /// Change the selected field. Does not touch field content.
    pub fn select(&mut self, ordinal: u16) -> Result<(), EffectorError> {
        if (ordinal as usize) >= self.fields.len() {
            return Err(EffectorError::UnknownField(ordinal));
        }
        self.selected = ordinal;
        Ok(())
    }

    pub fn get(&self, ordinal: u16) -> Result<&Field, EffectorError> {
        self.fields.get(ordinal as usize).ok_or(EffectorError::UnknownField(ordinal))
    }

    pub fn current(&self) -> &Field {
        &self.fields[self.selected as usize]
    }

    /// Append bytes to the selected field.
    pub fn append(&mut self, bytes: &[u8]) {
        self.fields[self.selected as usize].data.extend_from_slice(bytes);
    }

    /// Clear the selected field's content in place.
    pub fn clear(&mut self) {
        self.fields[self.selected as usize].data.clear();
    }

    /// Clear the selected field and return its prior content.
    pub fn cut(&mut self) -> Vec<u8> {
        std::mem::take(&mut self.fields[self.selected as usize].data)
    }

    /// Clear a specific field by ordinal, regardless of selection.
    pub fn clear_ordinal(&mut self, ordinal: u16) -> Result<(), EffectorError> {
        self.fields.get_mut(ordinal as usize).ok_or(EffectorError::UnknownField(ordinal))?.data.clear();
        Ok(())
    }

    /// Append the selected field's content into `dst`, leaving the selected
    /// field untouched (`copy(dst)`, `spec.md` §4.2).
    pub fn copy_into(&mut self, dst: u16) -> Result<(), EffectorError> {
        if (dst as usize) >= self.fields.len() {
            return Err(EffectorError::UnknownField(dst));
        }
        let content = self.fields[self.selected as usize].data.clone();
        self.fields[dst as usize].data.extend_from_slice(&content);
        Ok(())
    }

    /// Append the selected field's content into `dst`, then empty the
    /// selected field (`cut(dst)`, `spec.md` §4.2).
    pub fn cut_into(&mut self, dst: u16) -> Result<(), EffectorError> {
        self.copy_into(dst)?;
        self.fields[self.selected as usize].data.clear();
        Ok(())
    }

    /// Overwrite a specific field's content by ordinal, regardless of
    /// selection (used by `count` to write back a decremented value).
    pub fn set_ordinal(&mut self, ordinal: u16, bytes: &[u8]) -> Result<(), EffectorError> {
        let field = self.fields.get_mut(ordinal as usize).ok_or(EffectorError::UnknownField(ordinal))?;
        field.data.clear();
        field.data.extend_from_slice(bytes);
        Ok(())
    }

    /// Clear every field's content, leaving the selection untouched.
    pub fn clear_all(&mut self) {
        for field in &mut self.fields {
            field.data.clear();
        }
    }
}

#[cfg(test)]
mod fields_tests {
    use super::*;

    #[test]
    fn append_and_read_back() {
        let mut store = FieldStore::new(2);
        store.append(b"he");
        store.append(b"llo");
        assert_eq!(store.current().as_bytes(), b"hello");
    }

    #[test]
    fn select_switches_target_field() {
        let mut store = FieldStore::new(3);
        store.select(1).unwrap();
        store.append(b"a");
        store.select(2).unwrap();
        store.append(b"b");
        assert_eq!(store.get(1).unwrap().as_bytes(), b"a");
        assert_eq!(store.get(2).unwrap().as_bytes(), b"b");
    }

    #[test]
    fn select_unknown_field_errors() {
        let mut store = FieldStore::new(1);
        assert!(matches!(store.select(5), Err(EffectorError::UnknownField(5))));
    }

    #[test]
    fn cut_returns_and_clears() {
        let mut store = FieldStore::new(1);
        store.append(b"123");
        let cut = store.cut();
        assert_eq!(cut, b"123");
        assert_eq!(store.current().as_bytes(), b"");
    }

    #[test]
    fn copy_into_leaves_selected_field_intact() {
        let mut store = FieldStore::new(2);
        store.append(b"hi");
        store.copy_into(1).unwrap();
        assert_eq!(store.current().as_bytes(), b"hi");
        assert_eq!(store.get(1).unwrap().as_bytes(), b"hi");
    }

    #[test]
    fn cut_into_empties_selected_field() {
        let mut store = FieldStore::new(2);
        store.append(b"hi");
        store.cut_into(1).unwrap();
        assert_eq!(store.current().as_bytes(), b"");
        assert_eq!(store.get(1).unwrap().as_bytes(), b"hi");
    }

    #[test]
    fn set_ordinal_overwrites_regardless_of_selection() {
        let mut store = FieldStore::new(2);
        store.select(1).unwrap();
        store.append(b"stale");
        store.set_ordinal(1, b"3").unwrap();
        assert_eq!(store.get(1).unwrap().as_bytes(), b"3");
    }

    #[test]
    fn decodes_numeric_content() {
        let mut store = FieldStore::new(1);
        store.append(b"42");
        assert_eq!(store.current().as_i64().unwrap(), 42);
        store.clear();
        store.append(b"3.5");
        assert_eq!(store.current().as_f64().unwrap(), 3.5);
    }
}
