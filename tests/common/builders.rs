//! Builders for graph-encoded page-data payloads

use serde_json::{json, Map, Value};

/// Builds one node's pool, handing out pointers as cells are appended
///
/// Cell 0 is reserved for the root descriptor set with [`PoolBuilder::root`].
pub struct PoolBuilder {
    cells: Vec<Value>,
}

impl PoolBuilder {
    pub fn new() -> Self {
        Self {
            cells: vec![Value::Null],
        }
    }

    pub fn push(&mut self, cell: Value) -> usize {
        self.cells.push(cell);
        self.cells.len() - 1
    }

    pub fn string(&mut self, s: &str) -> usize {
        self.push(json!(s))
    }

    pub fn number(&mut self, n: f64) -> usize {
        self.push(json!(n))
    }

    pub fn array(&mut self, pointers: &[usize]) -> usize {
        self.push(json!(pointers))
    }

    pub fn record(&mut self, fields: &[(&str, usize)]) -> usize {
        self.push(record(fields))
    }

    /// Set cell 0
    pub fn root(&mut self, fields: &[(&str, usize)]) -> &mut Self {
        self.cells[0] = record(fields);
        self
    }

    pub fn build(self) -> Value {
        Value::Array(self.cells)
    }
}

impl Default for PoolBuilder {
    fn default() -> Self {
        Self::new()
    }
}

fn record(fields: &[(&str, usize)]) -> Value {
    let map: Map<String, Value> = fields
        .iter()
        .map(|(name, ptr)| (name.to_string(), json!(ptr)))
        .collect();
    Value::Object(map)
}

/// Builds a `{ "type": "data", "nodes": [...] }` payload
#[derive(Default)]
pub struct PageBuilder {
    nodes: Vec<Value>,
}

impl PageBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// A layout node that carries an unrelated pool
    pub fn layout_node(mut self) -> Self {
        self.nodes.push(json!({"type": "data", "data": [{"user": 1}, null], "uses": {}}));
        self
    }

    pub fn skip_node(mut self) -> Self {
        self.nodes.push(json!({"type": "skip"}));
        self
    }

    pub fn node(mut self, pool: PoolBuilder) -> Self {
        self.nodes.push(json!({"type": "data", "data": pool.build(), "uses": {"params": ["slug"]}}));
        self
    }

    pub fn search_node(mut self, pool: PoolBuilder) -> Self {
        self.nodes.push(json!({
            "type": "data",
            "data": pool.build(),
            "uses": {"search_params": ["page", "search"]}
        }));
        self
    }

    pub fn build(self) -> String {
        json!({"type": "data", "nodes": self.nodes}).to_string()
    }
}

/// Catalog page with `(media_id, title, slug)` candidates
pub fn catalog_page(candidates: &[(u32, &str, &str)]) -> String {
    let mut pool = PoolBuilder::new();
    let pointers: Vec<usize> = candidates
        .iter()
        .map(|(id, title, slug)| {
            let id = pool.number(f64::from(*id));
            let title = pool.string(title);
            let slug = pool.string(slug);
            pool.record(&[("id", id), ("title", title), ("slug", slug)])
        })
        .collect();
    let results = pool.array(&pointers);
    pool.root(&[("results", results)]);

    PageBuilder::new().layout_node().search_node(pool).build()
}

/// Media page with `(number, title)` episodes
pub fn media_page(media_id: u32, slug: &str, episodes: &[(f64, &str)]) -> String {
    let mut pool = PoolBuilder::new();
    let id = pool.number(f64::from(media_id));
    let slug_ptr = pool.string(slug);
    let pointers: Vec<usize> = episodes
        .iter()
        .map(|(number, title)| {
            let number = pool.number(*number);
            let title = pool.string(title);
            pool.record(&[("number", number), ("title", title)])
        })
        .collect();
    let list = pool.array(&pointers);
    pool.root(&[("id", id), ("slug", slug_ptr), ("episodes", list)]);

    PageBuilder::new().layout_node().skip_node().node(pool).build()
}

/// Episode page with `(category, [(server, url)])` embeds
pub fn episode_page(categories: &[(&str, &[(&str, &str)])]) -> String {
    let mut pool = PoolBuilder::new();
    let keys: Vec<(String, usize)> = categories
        .iter()
        .map(|(category, servers)| {
            let pointers: Vec<usize> = servers
                .iter()
                .map(|(name, url)| {
                    let name = pool.string(name);
                    let url = pool.string(url);
                    pool.record(&[("server", name), ("url", url)])
                })
                .collect();
            (category.to_string(), pool.array(&pointers))
        })
        .collect();
    let fields: Vec<(&str, usize)> = keys.iter().map(|(k, p)| (k.as_str(), *p)).collect();
    let embeds = pool.record(&fields);
    pool.root(&[("embeds", embeds)]);

    PageBuilder::new().layout_node().node(pool).build()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pool_builder_pointers() {
        let mut pool = PoolBuilder::new();
        let a = pool.string("a");
        let list = pool.array(&[a]);
        pool.root(&[("list", list)]);

        assert_eq!(pool.build(), json!([{"list": 2}, "a", [1]]));
    }
}
