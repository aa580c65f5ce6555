use catalog_module_ingestor::graph::{node::NodeInformation, Graph};
use catalog_test_context::CatalogContext;

/// Ingest products named `Product 00` to `Product {count-1}`, with ids sorting the same way.
pub async fn ingest_products(ctx: &CatalogContext, count: usize) -> anyhow::Result<()> {
    let graph = Graph::new(ctx.db.clone());

    for i in 0..count {
        graph
            .ingest_node(
                NodeInformation::product(format!("Product {i:02}")).with_id(format!("p{i:02}")),
                &ctx.db,
            )
            .await?;
    }

    Ok(())
}
