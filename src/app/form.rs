// ============================================================================
// Structure : Form
// ============================================================================
// Formulaire texte multi-champs (connexion, inscription)
// Tab / ↓ passe au champ suivant, Shift-Tab / ↑ au précédent
// ============================================================================

/// Un champ de formulaire
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormField {
    pub label: &'static str,
    pub value: String,

    /// Affiché masqué (mot de passe)
    pub secret: bool,
}

impl FormField {
    /// Valeur telle qu'affichée à l'écran
    pub fn display_value(&self) -> String {
        if self.secret {
            "•".repeat(self.value.chars().count())
        } else {
            self.value.clone()
        }
    }
}

/// Formulaire avec un champ actif
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Form {
    fields: Vec<FormField>,
    focus: usize,
}

impl Form {
    fn new(fields: &[(&'static str, bool)]) -> Self {
        Self {
            fields: fields
                .iter()
                .map(|&(label, secret)| FormField {
                    label,
                    value: String::new(),
                    secret,
                })
                .collect(),
            focus: 0,
        }
    }

    /// Email, mot de passe
    pub fn login() -> Self {
        Self::new(&[("Email", false), ("Password", true)])
    }

    /// Champs de l'inscription, dans l'ordre de validation
    pub fn registration() -> Self {
        Self::new(&[
            ("Name", false),
            ("Surname", false),
            ("Email", false),
            ("Password", true),
            ("Phone (05XXXXXXXXX)", false),
            ("National ID (optional)", false),
            ("Address (optional)", false),
        ])
    }

    pub fn fields(&self) -> &[FormField] {
        &self.fields
    }

    pub fn focus(&self) -> usize {
        self.focus
    }

    /// Valeur du champ `index` (chaîne vide si hors limites)
    pub fn value(&self, index: usize) -> &str {
        self.fields.get(index).map(|f| f.value.as_str()).unwrap_or("")
    }

    pub fn set_value(&mut self, index: usize, value: impl Into<String>) {
        if let Some(field) = self.fields.get_mut(index) {
            field.value = value.into();
        }
    }

    pub fn next_field(&mut self) {
        self.focus = (self.focus + 1) % self.fields.len().max(1);
    }

    pub fn previous_field(&mut self) {
        let len = self.fields.len().max(1);
        self.focus = (self.focus + len - 1) % len;
    }

    pub fn push_char(&mut self, c: char) {
        if let Some(field) = self.fields.get_mut(self.focus) {
            field.value.push(c);
        }
    }

    pub fn backspace(&mut self) {
        if let Some(field) = self.fields.get_mut(self.focus) {
            field.value.pop();
        }
    }

    /// Vide tous les champs et revient au premier
    pub fn clear(&mut self) {
        for field in &mut self.fields {
            field.value.clear();
        }
        self.focus = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_focus_wraps_around() {
        let mut form = Form::login();
        assert_eq!(form.focus(), 0);

        form.next_field();
        form.next_field();
        assert_eq!(form.focus(), 0);

        form.previous_field();
        assert_eq!(form.focus(), 1);
    }

    #[test]
    fn test_typing_goes_to_focused_field() {
        let mut form = Form::login();
        form.push_char('a');
        form.next_field();
        form.push_char('x');
        form.push_char('y');
        form.backspace();

        assert_eq!(form.value(0), "a");
        assert_eq!(form.value(1), "x");
        assert_eq!(form.fields()[1].display_value(), "•");
    }

    #[test]
    fn test_clear() {
        let mut form = Form::registration();
        form.set_value(2, "a@b.c");
        form.next_field();
        form.clear();

        assert_eq!(form.value(2), "");
        assert_eq!(form.focus(), 0);
    }
}
