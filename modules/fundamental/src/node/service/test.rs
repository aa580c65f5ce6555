use super::*;
use catalog_entity::{
    node_category::NodeCategory, product_type::ProductType,
    relationship_category::RelationshipCategory,
};
use catalog_module_ingestor::graph::{
    identification_helper::{CpeMetadata, IdentificationHelperInformation},
    node::NodeInformation,
};
use catalog_test_context::CatalogContext;
use test_context::test_context;
use test_log::test;
use time::macros::datetime;

#[test_context(CatalogContext)]
#[test(tokio::test)]
async fn hierarchy(ctx: &CatalogContext) -> anyhow::Result<()> {
    let vendor = ctx
        .graph
        .ingest_node(NodeInformation::vendor("V").with_id("V"), &ctx.db)
        .await?;
    let product = vendor
        .ingest_child(
            NodeInformation::product("P")
                .with_id("P")
                .with_product_type(ProductType::Software),
            &ctx.db,
        )
        .await?;
    product
        .ingest_child(
            NodeInformation::new(NodeCategory::ProductVersion, "Ver")
                .with_id("Ver")
                .with_released_at(datetime!(2023-11-07 12:00 UTC)),
            &ctx.db,
        )
        .await?;

    let service = NodeService::new(ctx.db.clone());
    let tree = service.fetch_tree("V", 2).await?.expect("must be found");

    assert_eq!(tree.len(), 3);
    assert_eq!(tree.root().id, "V");

    let children = tree.children("V").collect::<Vec<_>>();
    assert_eq!(children.len(), 1);
    assert_eq!(children[0].id, "P");
    assert_eq!(children[0].product_type, Some(ProductType::Software));

    let grandchildren = tree.children("P").collect::<Vec<_>>();
    assert_eq!(grandchildren.len(), 1);
    assert_eq!(grandchildren[0].id, "Ver");
    assert_eq!(
        grandchildren[0].released_at,
        Some(datetime!(2023-11-07 12:00 UTC))
    );
    assert_eq!(tree.parent("Ver").map(|n| n.id.as_str()), Some("P"));

    // one level only
    let tree = service.fetch_tree("V", 1).await?.expect("must be found");
    assert_eq!(tree.len(), 2);
    assert!(tree.get("Ver").is_none());

    assert!(service.fetch_tree("missing", 2).await?.is_none());

    Ok(())
}

#[test_context(CatalogContext)]
#[test(tokio::test)]
async fn children_by_id(ctx: &CatalogContext) -> anyhow::Result<()> {
    let vendor = ctx
        .graph
        .ingest_node(NodeInformation::vendor("V").with_id("v"), &ctx.db)
        .await?;
    for id in ["c", "a", "b"] {
        vendor
            .ingest_child(NodeInformation::product(id).with_id(id), &ctx.db)
            .await?;
    }

    let service = NodeService::new(ctx.db.clone());
    let tree = service.fetch_tree("v", 1).await?.expect("must be found");

    assert_eq!(
        tree.children("v").map(|n| n.id.as_str()).collect::<Vec<_>>(),
        ["a", "b", "c"]
    );

    Ok(())
}

#[test_context(CatalogContext)]
#[test(tokio::test)]
async fn orphans(ctx: &CatalogContext) -> anyhow::Result<()> {
    let vendor = ctx
        .graph
        .ingest_node(NodeInformation::vendor("V").with_id("v"), &ctx.db)
        .await?;
    vendor
        .ingest_child(NodeInformation::product("P").with_id("p"), &ctx.db)
        .await?;

    ctx.graph.delete_node("v", &ctx.db).await?;

    let service = NodeService::new(ctx.db.clone());
    let product = service.fetch_node("p").await?.expect("must survive");
    assert_eq!(product.parent_id, None);
    assert!(service.fetch_node("v").await?.is_none());

    Ok(())
}

#[test_context(CatalogContext)]
#[test(tokio::test)]
async fn successors(ctx: &CatalogContext) -> anyhow::Result<()> {
    for id in ["1.0", "1.1", "2.0"] {
        ctx.graph
            .ingest_node(
                NodeInformation::new(NodeCategory::ProductVersion, id).with_id(id),
                &ctx.db,
            )
            .await?;
    }
    ctx.graph.set_successor("1.0", Some("1.1"), &ctx.db).await?;
    ctx.graph.set_successor("1.1", Some("2.0"), &ctx.db).await?;

    let service = NodeService::new(ctx.db.clone());

    assert_eq!(service.fetch_successors("1.0").await?, ["1.1", "2.0"]);
    assert_eq!(service.fetch_successors("1.1").await?, ["2.0"]);
    assert!(service.fetch_successors("2.0").await?.is_empty());
    assert!(service.fetch_successors("missing").await?.is_empty());

    // deleting a successor clears the reference
    ctx.graph.delete_node("1.1", &ctx.db).await?;
    assert!(service.fetch_successors("1.0").await?.is_empty());

    Ok(())
}

#[test_context(CatalogContext)]
#[test(tokio::test)]
async fn relationships(ctx: &CatalogContext) -> anyhow::Result<()> {
    let a = ctx
        .graph
        .ingest_node(NodeInformation::product("A").with_id("a"), &ctx.db)
        .await?;
    let b = ctx
        .graph
        .ingest_node(NodeInformation::product("B").with_id("b"), &ctx.db)
        .await?;
    ctx.graph
        .ingest_node(NodeInformation::product("C").with_id("c"), &ctx.db)
        .await?;

    a.relate_to(RelationshipCategory::InstalledOn, "b", &ctx.db).await?;
    b.relate_to(RelationshipCategory::InstalledWith, "c", &ctx.db).await?;
    a.relate_to(RelationshipCategory::DefaultComponentOf, "a", &ctx.db).await?;

    let service = NodeService::new(ctx.db.clone());

    let mut categories = service
        .fetch_relationships("a")
        .await?
        .into_iter()
        .map(|r| r.category)
        .collect::<Vec<_>>();
    categories.sort_by_key(ToString::to_string);
    assert_eq!(
        categories,
        [
            RelationshipCategory::DefaultComponentOf,
            RelationshipCategory::InstalledOn
        ]
    );

    assert_eq!(service.fetch_relationships("b").await?.len(), 2);

    ctx.graph.delete_node("b", &ctx.db).await?;
    assert_eq!(service.fetch_relationships("a").await?.len(), 1);
    assert!(service.fetch_relationships("c").await?.is_empty());

    Ok(())
}

#[test_context(CatalogContext)]
#[test(tokio::test)]
async fn identification_helpers(ctx: &CatalogContext) -> anyhow::Result<()> {
    let version = ctx
        .graph
        .ingest_node(
            NodeInformation::new(NodeCategory::ProductVersion, "9").with_id("ver"),
            &ctx.db,
        )
        .await?;

    let raw = (0..=255u8).collect::<Vec<_>>();
    version
        .ingest_identification_helper(
            IdentificationHelperInformation::new("raw", raw.clone()),
            &ctx.db,
        )
        .await?;
    version
        .ingest_identification_helper(
            IdentificationHelperInformation::cpe("cpe:/o:redhat:enterprise_linux:9")?,
            &ctx.db,
        )
        .await?;

    let service = NodeService::new(ctx.db.clone());
    let helpers = service.fetch_identification_helpers("ver").await?;
    assert_eq!(helpers.len(), 2);

    let stored = helpers
        .iter()
        .find(|helper| helper.category == "raw")
        .expect("must be found");
    assert_eq!(stored.metadata, raw);

    let cpe = helpers
        .iter()
        .find(|helper| helper.category == "cpe")
        .expect("must be found");
    assert_eq!(
        cpe.json::<CpeMetadata>()?,
        CpeMetadata {
            cpe: "cpe:/o:redhat:enterprise_linux:9".into()
        }
    );

    ctx.graph.delete_node("ver", &ctx.db).await?;
    assert!(service.fetch_identification_helpers("ver").await?.is_empty());

    Ok(())
}
