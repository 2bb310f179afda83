//! Built-in catalog of selectable service offerings.
//!
//! The catalog is configuration data owned by the surrounding application:
//! loaded once, grouped by category, never mutated at runtime. Ids are the
//! stable keys the orchestrator and the prompt builder work with.

use serde::{Deserialize, Serialize};

/// A single selectable service offering.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct ServiceItem {
    pub id: String,
    pub title: String,
    pub description: String,
    pub category: String,
    pub icon: String,
}

/// Ordered group of services under one category heading.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct ServiceCategory {
    pub name: String,
    pub items: Vec<ServiceItem>,
}

#[derive(Debug, Clone)]
pub struct Catalog {
    categories: Vec<ServiceCategory>,
}

impl Catalog {
    pub fn new(categories: Vec<ServiceCategory>) -> Self {
        Self { categories }
    }

    /// The standard service offering list.
    pub fn standard() -> Self {
        let mut categories = Vec::new();

        categories.push(category(
            "Design & Design Systems",
            vec![
                item(
                    "design-system",
                    "Design System Development",
                    "Building scalable component libraries and style guides designed to streamline design-to-development workflows.",
                    "Layers",
                ),
                item(
                    "ui-design",
                    "UI/UX Design",
                    "Crafting user-centric interfaces that bridge creativity and functionality, ensuring a seamless user experience.",
                    "Paintbrush",
                ),
            ],
        ));

        categories.push(category(
            "Advanced Development",
            vec![
                item(
                    "ai-integration",
                    "AI Integration",
                    "Harness the power of custom AI solutions and ML model deployment to transform your digital landscape.",
                    "Brain",
                ),
                item(
                    "data-pipeline",
                    "Data Pipeline Development",
                    "Develop scalable data processing and analytics systems tailored for your industry's needs.",
                    "Network",
                ),
            ],
        ));

        categories.push(category(
            "Web Development",
            vec![
                item(
                    "frontend",
                    "Front-end Development",
                    "Creating modern, responsive web applications with precision and expertise, ensuring cross-platform excellence.",
                    "Layout",
                ),
                item(
                    "backend",
                    "Back of the Front-end Development",
                    "Designing scalable server architectures and robust APIs to support your digital operations.",
                    "ServerCog",
                ),
            ],
        ));

        categories.push(category(
            "Consulting",
            vec![
                item(
                    "tech-consulting",
                    "Technical Consulting",
                    "Offering expert guidance on architecture and tech stack to optimize your project's potential.",
                    "Compass",
                ),
                item(
                    "ai-strategy",
                    "AI Strategy",
                    "Develop an AI implementation roadmap that aligns with your business objectives and technological goals.",
                    "TreeDeciduous",
                ),
            ],
        ));

        Self { categories }
    }

    pub fn categories(&self) -> &[ServiceCategory] {
        &self.categories
    }

    /// Lookup by stable id across all categories.
    pub fn find(&self, id: &str) -> Option<&ServiceItem> {
        self.categories
            .iter()
            .flat_map(|category| category.items.iter())
            .find(|service| service.id == id)
    }

    /// Resolves a selection to display titles. Unknown ids pass through
    /// unchanged so a stale selection still renders something.
    pub fn titles_for(&self, ids: &[String]) -> Vec<String> {
        ids.iter()
            .map(|id| {
                self.find(id)
                    .map(|service| service.title.clone())
                    .unwrap_or_else(|| id.clone())
            })
            .collect()
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::standard()
    }
}

fn category(name: &str, items: Vec<ServiceItem>) -> ServiceCategory {
    let mut items = items;
    for service in &mut items {
        service.category = name.to_string();
    }
    ServiceCategory {
        name: name.to_string(),
        items,
    }
}

fn item(id: &str, title: &str, description: &str, icon: &str) -> ServiceItem {
    ServiceItem {
        id: id.to_string(),
        title: title.to_string(),
        description: description.to_string(),
        category: String::new(),
        icon: icon.to_string(),
    }
}
