use tactile_foundation::GestureElement;
use wasm_bindgen::JsCast;
use web_sys::{Element, HtmlElement};

/// A DOM element driven by a gesture binding.
///
/// Style writes go through `HTMLElement.style`, so custom properties land
/// inline where descendants can read them.
#[derive(Clone, Debug)]
pub struct WebElement {
    element: Element,
}

impl WebElement {
    pub fn new(element: Element) -> Self {
        Self { element }
    }

    /// Looks the element up by id in the current document.
    pub fn by_id(id: &str) -> Option<Self> {
        let document = web_sys::window()?.document()?;
        document.get_element_by_id(id).map(Self::new)
    }

    pub fn element(&self) -> &Element {
        &self.element
    }

    fn html(&self) -> Option<&HtmlElement> {
        self.element.dyn_ref::<HtmlElement>()
    }
}

impl GestureElement for WebElement {
    fn set_attribute(&self, name: &str, value: &str) {
        if let Err(err) = self.element.set_attribute(name, value) {
            log::debug!("setAttribute({name}) failed: {err:?}");
        }
    }

    fn remove_attribute(&self, name: &str) {
        if let Err(err) = self.element.remove_attribute(name) {
            log::debug!("removeAttribute({name}) failed: {err:?}");
        }
    }

    fn set_style_property(&self, name: &str, value: &str) {
        let Some(html) = self.html() else {
            log::debug!("element has no inline style, skipping {name}");
            return;
        };
        if let Err(err) = html.style().set_property(name, value) {
            log::debug!("style.setProperty({name}) failed: {err:?}");
        }
    }

    fn remove_style_property(&self, name: &str) {
        if let Some(html) = self.html() {
            if let Err(err) = html.style().remove_property(name) {
                log::debug!("style.removeProperty({name}) failed: {err:?}");
            }
        }
    }
}
