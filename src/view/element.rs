//! 原生元素：平台视图对象在本层的数据替身

use std::collections::HashMap;

#[derive(Debug, Clone, Default)]
pub struct NativeElement {
    tag: String,
    attributes: HashMap<String, String>,
    text: String,
    children: Vec<NativeElement>,
}

impl NativeElement {
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            attributes: HashMap::new(),
            text: String::new(),
            children: Vec::new(),
        }
    }

    pub fn tag(&self) -> &str {
        &self.tag
    }

    pub fn set_attribute(&mut self, name: &str, value: impl Into<String>) {
        self.attributes.insert(name.to_string(), value.into());
    }

    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }

    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn append_child(&mut self, child: NativeElement) {
        self.children.push(child);
    }

    pub fn children(&self) -> &[NativeElement] {
        &self.children
    }
}
