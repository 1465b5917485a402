use crate::domain::model::{Domain, Service};

fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    needle.is_empty() || haystack.to_lowercase().contains(&needle.to_lowercase())
}

/// Case-insensitive name search on the raw text. An empty filter matches every domain.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DomainFilter {
    pub text: String,
}

impl DomainFilter {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }

    pub fn matches(&self, domain: &Domain) -> bool {
        contains_ignore_case(&domain.name, &self.text)
    }

    pub fn apply<'a>(&self, domains: &'a [Domain]) -> Vec<&'a Domain> {
        domains.iter().filter(|d| self.matches(d)).collect()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ServiceFilter {
    pub text: String,
    /// Exact match; `None` means any division.
    pub division: Option<String>,
    pub sub_division: Option<String>,
}

impl ServiceFilter {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Default::default()
        }
    }

    pub fn with_division(mut self, division: impl Into<String>) -> Self {
        self.division = Some(division.into());
        self
    }

    pub fn with_sub_division(mut self, sub_division: impl Into<String>) -> Self {
        self.sub_division = Some(sub_division.into());
        self
    }

    pub fn matches(&self, service: &Service) -> bool {
        if !contains_ignore_case(&service.name, &self.text) {
            return false;
        }

        if let Some(division) = &self.division {
            if &service.division != division {
                return false;
            }
        }

        match &self.sub_division {
            Some(sub) => service.sub_division.as_deref() == Some(sub.as_str()),
            None => true,
        }
    }

    pub fn apply<'a>(&self, services: &'a [Service]) -> Vec<&'a Service> {
        services.iter().filter(|s| self.matches(s)).collect()
    }
}
