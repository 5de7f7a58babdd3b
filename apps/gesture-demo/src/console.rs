use std::cell::RefCell;
use tactile_foundation::GestureElement;

/// Element that logs every write and remembers its inline style.
pub struct ConsoleElement {
    name: &'static str,
    styles: RefCell<Vec<(String, String)>>,
}

impl ConsoleElement {
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            styles: RefCell::new(Vec::new()),
        }
    }

    pub fn style(&self, name: &str) -> Option<String> {
        self.styles
            .borrow()
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.clone())
    }

    pub fn style_text(&self) -> String {
        self.styles
            .borrow()
            .iter()
            .map(|(name, value)| format!("{name}: {value};"))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl GestureElement for ConsoleElement {
    fn set_attribute(&self, name: &str, value: &str) {
        log::info!("<{}> {name}=\"{value}\"", self.name);
    }

    fn remove_attribute(&self, name: &str) {
        log::info!("<{}> -{name}", self.name);
    }

    fn set_style_property(&self, name: &str, value: &str) {
        log::trace!("<{}> style {name}: {value}", self.name);
        let mut styles = self.styles.borrow_mut();
        match styles.iter_mut().find(|(key, _)| key == name) {
            Some(entry) => entry.1 = value.to_string(),
            None => styles.push((name.to_string(), value.to_string())),
        }
    }

    fn remove_style_property(&self, name: &str) {
        log::trace!("<{}> style -{name}", self.name);
        self.styles.borrow_mut().retain(|(key, _)| key != name);
    }
}
