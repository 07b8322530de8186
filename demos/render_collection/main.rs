//! Converts a page of entities into a HAL collection and renders it

use hal::prelude::*;
use uuid::Uuid;

#[derive(Debug, Serialize)]
struct Customer {
    customer_id: Uuid,
    name: String,
    password_hash: String,
    assigned_to: Vec<String>,
}

impl_hal_entity!(Customer, "Customer", assigned_to);

const RENDERER_CONFIG: &str = r#"
api_base: https://api.example.com
build_link_header: true
entity_definitions:
  - entity_type: customer
    collection_type: customers
    entity_path: /customers/:customer_id
    collection_path: /customers
    collection_map:
      total_count: total_count
      offset: offset
      limit: limit
    entity_map:
      customer_id: customer_id
      name: name
"#;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    println!("HAL collection example\n");

    let renderer = HalRenderer::new(HalOptions::from_yaml_str(RENDERER_CONFIG)?)?;
    let transformer = EntityTransformer::from_value(json!({
        "pathMap": {
            "/customers": {"entity": "Customer"},
            "/groups": {"entity": "Group"},
        },
        "entityConfig": {
            "Customer": {"type": "CUS", "hal": {"rel": "customer"}},
            "Group": {"type": "GRP", "hal": {"rel": "group"}},
        },
    }))?;

    let group_id = Uuid::new_v4();
    let customers = vec![
        Customer {
            customer_id: Uuid::new_v4(),
            name: "Alice".to_string(),
            password_hash: "$argon2$...".to_string(),
            assigned_to: vec![format!("GRP:{}", group_id)],
        },
        Customer {
            customer_id: Uuid::new_v4(),
            name: "Bob".to_string(),
            password_hash: "$argon2$...".to_string(),
            assigned_to: Vec::new(),
        },
    ];

    let cursor = PagedEntities::from_page(customers, 12, "page-2");
    let mut collection = transformer.entities_to_collection("Customer", cursor, "/customers")?;

    let document = renderer.render(&mut collection)?;

    println!("Content-Type: {}", document.media_type);
    if let Some(link_header) = &document.link_header {
        println!("Link: {}", link_header);
    }
    println!("{}", serde_json::to_string_pretty(&document.body)?);

    Ok(())
}
