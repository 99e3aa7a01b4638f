//! Command execution. Every command returns the text to print on stdout.

use std::fmt::Write as _;

use anyhow::{Context, bail};
use catalog_client::{
    CatalogState, Category, CategoryCreate, CategoryNode, EntityStore, HttpClient, Product,
    ProductGroup, Resource, Variation,
};
use serde::Serialize;

use crate::cli::{Command, ResourceKind};

/// A resource that can be printed as a table row
pub trait Row {
    const COLUMNS: &'static [&'static str];

    fn cells(&self) -> Vec<String>;
}

fn opt<T: ToString>(value: Option<T>) -> String {
    value.map(|v| v.to_string()).unwrap_or_else(|| "-".into())
}

impl Row for Category {
    const COLUMNS: &'static [&'static str] = &["ID", "NAME", "PARENT", "CONTAINER"];

    fn cells(&self) -> Vec<String> {
        vec![
            self.id.to_string(),
            self.name.clone(),
            opt(self.parent_id),
            if self.is_container { "yes" } else { "no" }.into(),
        ]
    }
}

impl Row for Product {
    const COLUMNS: &'static [&'static str] = &["ID", "NAME", "GROUP", "PRICE", "STOCK", "SKU"];

    fn cells(&self) -> Vec<String> {
        vec![
            self.id.to_string(),
            self.name.clone(),
            self.product_group_id.to_string(),
            self.price.to_string(),
            self.stock_qty.to_string(),
            opt(self.sku.as_deref()),
        ]
    }
}

impl Row for Variation {
    const COLUMNS: &'static [&'static str] = &["ID", "NAME", "CATEGORY"];

    fn cells(&self) -> Vec<String> {
        vec![self.id.to_string(), self.name.clone(), opt(self.category_id)]
    }
}

impl Row for ProductGroup {
    const COLUMNS: &'static [&'static str] = &["ID", "NAME", "CATEGORY"];

    fn cells(&self) -> Vec<String> {
        vec![
            self.id.to_string(),
            self.name.clone(),
            self.category_id.to_string(),
        ]
    }
}

/// Left-aligned table with a header row
pub fn render_table<R: Row>(items: &[R]) -> String {
    let rows: Vec<Vec<String>> = items.iter().map(Row::cells).collect();
    let widths: Vec<usize> = R::COLUMNS
        .iter()
        .enumerate()
        .map(|(i, header)| {
            rows.iter()
                .map(|row| row[i].chars().count())
                .chain(std::iter::once(header.len()))
                .max()
                .unwrap_or(0)
        })
        .collect();

    let mut out = String::new();
    let header: Vec<String> = R::COLUMNS.iter().map(|h| h.to_string()).collect();
    for row in std::iter::once(&header).chain(rows.iter()) {
        let line: Vec<String> = row
            .iter()
            .zip(&widths)
            .map(|(cell, width)| format!("{:<width$}", cell, width = width))
            .collect();
        let _ = writeln!(out, "{}", line.join("  ").trim_end());
    }
    out
}

/// Category forest, two spaces of indent per level
pub fn render_tree(forest: &[CategoryNode]) -> String {
    let mut out = String::new();
    for root in forest {
        root.walk(&mut |node: &CategoryNode, depth: usize| {
            let marker = if node.category.is_container { "/" } else { "" };
            let _ = writeln!(
                out,
                "{}{}{} [{}]",
                "  ".repeat(depth),
                node.name(),
                marker,
                node.key
            );
        });
    }
    out
}

async fn list<R, H>(store: &EntityStore<R, H>, json: bool) -> anyhow::Result<String>
where
    R: Resource + Row + Serialize,
    H: HttpClient,
{
    if !store.fetch_all(false).await {
        bail!(
            "failed to load {}: {}",
            R::PATH,
            store.error().unwrap_or_default()
        );
    }
    let items = store.items();
    if json {
        serde_json::to_string_pretty(&items).context("failed to encode JSON")
    } else {
        Ok(render_table(&items))
    }
}

async fn delete<R: Resource, H: HttpClient>(
    store: &EntityStore<R, H>,
    id: i64,
) -> anyhow::Result<String> {
    if store.remove(id).await {
        Ok(format!("deleted {} {}", R::NAME, id))
    } else {
        bail!(store.error().unwrap_or_else(|| format!("Failed to delete {}", R::NAME)))
    }
}

pub async fn run<H: HttpClient>(catalog: &CatalogState<H>, command: Command) -> anyhow::Result<String> {
    tracing::debug!(?command, "running command");

    match command {
        Command::Tree => {
            let store = catalog.categories();
            if !store.fetch_all(false).await {
                bail!(
                    "failed to load categories: {}",
                    store.error().unwrap_or_default()
                );
            }
            Ok(render_tree(&store.tree()))
        }
        Command::List { resource, json } => match resource {
            ResourceKind::Categories => list(catalog.categories(), json).await,
            ResourceKind::Products => list(catalog.products(), json).await,
            ResourceKind::Variations => list(catalog.variations(), json).await,
            ResourceKind::ProductGroups => list(catalog.product_groups(), json).await,
        },
        Command::CreateCategory {
            name,
            parent,
            description,
            container,
        } => {
            let mut payload = CategoryCreate::new(name);
            if let Some(parent) = parent {
                payload = payload.with_parent(parent);
            }
            if let Some(description) = description {
                payload = payload.with_description(description);
            }
            if container {
                payload = payload.container();
            }

            let store = catalog.categories();
            match store.create(&payload).await {
                Some(category) => Ok(format!("created category {} [{}]", category.name, category.id)),
                None => match store.field_errors() {
                    Some(fields) => {
                        let details: Vec<String> = fields
                            .iter()
                            .map(|(field, message)| format!("{}: {}", field, message))
                            .collect();
                        bail!("invalid category: {}", details.join(", "))
                    }
                    None => bail!(store.error().unwrap_or_else(|| "create failed".into())),
                },
            }
        }
        Command::Delete { resource, id } => match resource {
            ResourceKind::Categories => delete(catalog.categories(), id).await,
            ResourceKind::Products => delete(catalog.products(), id).await,
            ResourceKind::Variations => delete(catalog.variations(), id).await,
            ResourceKind::ProductGroups => delete(catalog.product_groups(), id).await,
        },
    }
}
