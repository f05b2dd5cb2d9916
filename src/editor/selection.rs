use crate::scene::ObjectId;

/// Zero-or-one selected top-level object
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Selection {
    #[default]
    Empty,
    Selected(ObjectId),
}

impl Selection {
    pub fn id(&self) -> Option<ObjectId> {
        match self {
            Selection::Empty => None,
            Selection::Selected(id) => Some(*id),
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Selection::Empty)
    }

    pub fn is(&self, id: ObjectId) -> bool {
        self.id() == Some(id)
    }
}

impl From<Option<ObjectId>> for Selection {
    fn from(id: Option<ObjectId>) -> Self {
        id.map_or(Selection::Empty, Selection::Selected)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_empty() {
        assert!(Selection::default().is_empty());
        assert_eq!(Selection::default().id(), None);
    }

    #[test]
    fn from_option() {
        assert_eq!(Selection::from(Some(ObjectId(3))), Selection::Selected(ObjectId(3)));
        assert_eq!(Selection::from(None), Selection::Empty);
        assert!(Selection::Selected(ObjectId(3)).is(ObjectId(3)));
        assert!(!Selection::Selected(ObjectId(3)).is(ObjectId(4)));
    }
}
