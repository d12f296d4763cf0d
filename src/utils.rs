//! Some utility functions

use scraper::ElementRef;

/// Walks an HTML tree and returns every element that has the given name, in document order
///
/// Nested matches are returned as well, after the element that contains them.
pub fn find_elems<'a, S: AsRef<str>>(root: ElementRef<'a>, searched_name: S) -> Vec<ElementRef<'a>> {
    let searched_name = searched_name.as_ref();
    root.descendants()
        .filter_map(ElementRef::wrap)
        .filter(|el| el.value().name() == searched_name)
        .collect()
}

/// The closest ancestor of an element that has the given name
pub fn closest<'a>(element: ElementRef<'a>, searched_name: &str) -> Option<ElementRef<'a>> {
    element.ancestors()
        .filter_map(ElementRef::wrap)
        .find(|el| el.value().name() == searched_name)
}

/// The element right before this one, skipping text and comments
pub fn previous_element(element: ElementRef<'_>) -> Option<ElementRef<'_>> {
    element.prev_siblings()
        .filter_map(ElementRef::wrap)
        .next()
}

/// The text of an element and of all its descendants, whitespace runs collapsed to a single space
pub fn text_content(element: ElementRef) -> String {
    collapsed_text(element, false)
}

/// Same as [`text_content`], without the text of nested lists
pub fn own_text(element: ElementRef) -> String {
    collapsed_text(element, true)
}

fn collapsed_text(element: ElementRef, skip_lists: bool) -> String {
    let mut raw = String::new();
    append_text(element, skip_lists, &mut raw);
    raw.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn append_text(element: ElementRef, skip_lists: bool, out: &mut String) {
    for node in element.children() {
        if let Some(text) = node.value().as_text() {
            out.push_str(text);
        } else if let Some(child) = ElementRef::wrap(node) {
            let name = child.value().name();
            if skip_lists && is_list(name) {
                continue;
            }
            // Block elements are not always separated by whitespace in the source
            let block = is_block(name);
            if block { out.push(' '); }
            append_text(child, skip_lists, out);
            if block { out.push(' '); }
        }
    }
}

fn is_list(name: &str) -> bool {
    matches!(name, "ul" | "ol" | "dl")
}

fn is_block(name: &str) -> bool {
    is_list(name) || matches!(name, "p" | "div" | "li" | "dt" | "dd" | "br" | "hr"
        | "h1" | "h2" | "h3" | "h4" | "h5" | "h6" | "table" | "tr" | "td" | "th")
}
