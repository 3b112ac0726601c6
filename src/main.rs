use anyhow::Context;
use graphshim::{ElementId, EngineConfig, GraphService, PropertyMap, PropertyValue};
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    let config = match std::env::args().nth(1) {
        Some(path) => EngineConfig::from_file(&path)
            .with_context(|| format!("failed to load config from {}", path))?,
        None => EngineConfig::default(),
    };

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.log_filter))
        .context("invalid log filter")?;
    tracing_subscriber::fmt().with_env_filter(filter).init();

    println!("Graphshim v{}", graphshim::version());
    println!("==========================================");

    let service = GraphService::try_new(config)?;
    demo_traversal(&service)?;
    demo_rollback(&service)?;
    demo_delete_related(&service)?;
    Ok(())
}

fn person(name: &str) -> PropertyMap {
    let mut attrs = PropertyMap::new();
    attrs.insert("name".to_string(), PropertyValue::from(name));
    attrs
}

fn name_of(service: &GraphService, element: &ElementId) -> anyhow::Result<String> {
    let id = element
        .as_vertex()
        .with_context(|| format!("{} is not a vertex", element))?;
    let vertex = service.get_vertex(id)?;
    Ok(vertex
        .get_property("name")
        .and_then(|name| name.as_string())
        .map(str::to_string)
        .unwrap_or_else(|| id.to_string()))
}

fn demo_traversal(service: &GraphService) -> anyhow::Result<()> {
    println!("\n=== Demo 1: Paginated traversal ===");
    let alice = service.save_vertex(None, &person("Alice"))?;
    for friend in ["Bob", "Carol", "Dave", "Erin", "Frank"] {
        let id = service.save_vertex(None, &person(friend))?;
        service.save_edge(None, "knows", alice, id, &PropertyMap::new())?;
    }
    let eve = service.save_vertex(None, &person("Eve"))?;
    service.save_edge(None, "follows", eve, alice, &PropertyMap::new())?;

    for page in 1..=4 {
        let result = service.traversal(alice, "outVertices", Some("knows"), Some(page), Some(2))?;
        let names = result
            .iter()
            .map(|element| name_of(service, element))
            .collect::<anyhow::Result<Vec<_>>>()?;
        println!("  page {}: {:?}", page, names);
    }

    let first_page = service.traversal(alice, "outVertices", Some("knows"), Some(1), Some(2))?;
    let ids: Vec<_> = first_page.iter().filter_map(ElementId::as_vertex).collect();
    let vertices = service.get_vertices(&ids)?;
    println!("  page 1 as JSON:\n{}", serde_json::to_string_pretty(&vertices)?);

    let followers = service.traversal(alice, "inEdges", None, None, None)?;
    println!("  Alice has {} incoming edge(s)", followers.len());
    Ok(())
}

fn demo_rollback(service: &GraphService) -> anyhow::Result<()> {
    println!("\n=== Demo 2: Rollback ===");
    let before = service.vertex_count();
    let result = service.transaction(|tx| {
        tx.upsert_vertex(None, &person("Ghost"))?;
        tx.state().vertex(graphshim::VertexId::new(u64::MAX))?;
        Ok::<_, graphshim::GraphError>(())
    });
    println!("  transaction result: {:?}", result);
    println!("  vertices before: {}, after: {}", before, service.vertex_count());
    Ok(())
}

fn demo_delete_related(service: &GraphService) -> anyhow::Result<()> {
    println!("\n=== Demo 3: Delete related ===");
    let hub = service.save_vertex(None, &person("Hub"))?;
    for name in ["Spoke 1", "Spoke 2"] {
        let spoke = service.save_vertex(None, &person(name))?;
        service.save_edge(None, "owns", hub, spoke, &PropertyMap::new())?;
    }

    let report = service.delete_related(hub, "outVertices", Some("owns"))?;
    println!(
        "  removed {} edge(s) and {} vertex(es)",
        report.edges.len(),
        report.vertices.len()
    );
    println!(
        "  graph now has {} vertices and {} edges",
        service.vertex_count(),
        service.edge_count()
    );
    Ok(())
}
