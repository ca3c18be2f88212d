// ============================================================================
// Structure : ShoppingList
// ============================================================================
// Liste de courses locale (ordre d'ajout conservé)
// ============================================================================

/// Liste de courses
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ShoppingList {
    items: Vec<String>,
}

impl ShoppingList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Ajoute un article (texte nettoyé)
    ///
    /// Retourne false si le texte est vide ou déjà présent.
    pub fn add(&mut self, item: &str) -> bool {
        let item = item.trim();
        if item.is_empty() || self.items.iter().any(|i| i == item) {
            return false;
        }
        self.items.push(item.to_string());
        true
    }

    /// Retire un article par sa valeur
    pub fn remove(&mut self, item: &str) -> bool {
        let before = self.items.len();
        self.items.retain(|i| i != item);
        self.items.len() != before
    }

    /// Retire l'article à l'index donné (sélection dans l'UI)
    pub fn remove_at(&mut self, index: usize) -> Option<String> {
        if index < self.items.len() {
            Some(self.items.remove(index))
        } else {
            None
        }
    }

    pub fn items(&self) -> &[String] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_trims_and_ignores_empty() {
        let mut list = ShoppingList::new();

        assert!(list.add("  ekmek "));
        assert!(!list.add("   "));
        assert!(!list.add("ekmek"));

        assert_eq!(list.items(), &["ekmek".to_string()]);
    }

    #[test]
    fn test_remove() {
        let mut list = ShoppingList::new();
        list.add("süt");
        list.add("yumurta");

        assert!(list.remove("süt"));
        assert!(!list.remove("süt"));
        assert_eq!(list.len(), 1);

        assert_eq!(list.remove_at(0), Some("yumurta".to_string()));
        assert_eq!(list.remove_at(0), None);
        assert!(list.is_empty());
    }
}
