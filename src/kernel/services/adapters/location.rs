//! Page address with editable query parameters.

use crate::kernel::services::ports::PageLocation;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageAddress {
    base: String,
    query: Vec<(String, String)>,
    fragment: Option<String>,
}

impl PageAddress {
    pub fn parse(href: &str) -> Self {
        let (rest, fragment) = match href.split_once('#') {
            Some((rest, fragment)) => (rest, Some(fragment.to_string())),
            None => (href, None),
        };
        let (base, query) = rest.split_once('?').unwrap_or((rest, ""));

        let query = query
            .split('&')
            .filter(|pair| !pair.is_empty())
            .map(|pair| {
                let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
                (decode_component(key), decode_component(value))
            })
            .collect();

        Self {
            base: base.to_string(),
            query,
            fragment,
        }
    }
}

fn decode_component(raw: &str) -> String {
    let raw = raw.replace('+', " ");
    match urlencoding::decode(&raw) {
        Ok(decoded) => decoded.into_owned(),
        Err(_) => raw,
    }
}

impl PageLocation for PageAddress {
    fn query_param(&self, name: &str) -> Option<String> {
        self.query
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.clone())
    }

    fn set_query_param(&mut self, name: &str, value: &str) {
        match self.query.iter_mut().find(|(key, _)| key == name) {
            Some((_, existing)) => *existing = value.to_string(),
            None => self.query.push((name.to_string(), value.to_string())),
        }
    }

    fn href(&self) -> String {
        let mut href = self.base.clone();
        for (index, (key, value)) in self.query.iter().enumerate() {
            href.push(if index == 0 { '?' } else { '&' });
            href.push_str(&urlencoding::encode(key));
            if !value.is_empty() {
                href.push('=');
                href.push_str(&urlencoding::encode(value));
            }
        }
        if let Some(fragment) = &self.fragment {
            href.push('#');
            href.push_str(fragment);
        }
        href
    }
}

#[cfg(test)]
#[path = "../../../../tests/unit/kernel/services/adapters/location.rs"]
mod tests;
