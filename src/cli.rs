use crate::app::dto::{CaseGroupDto, ConsumerDto, NodeDto, TerminusKind};
use crate::app::engine::AnalysisEngine;
use anyhow::{Context as _, Result, anyhow};
use std::path::Path;

const MAX_CONSUMERS_SHOWN: usize = 5;

fn label(node: &NodeDto) -> &str {
    node.fqn
        .as_deref()
        .or(node.name.as_deref())
        .unwrap_or(node.id.as_str())
}

fn print_banner(title: &str) {
    println!("{}", "=".repeat(80));
    println!("{title}");
    println!("{}", "=".repeat(80));
}

pub fn display_summary(engine: &AnalysisEngine) -> Result<()> {
    let summary = engine.summary();
    print_banner("GRAPH SUMMARY");
    println!("  Nodes: {}", summary.node_count);
    println!("  Edges: {}", summary.edge_count);
    if summary.dangling_edges > 0 {
        println!("  Dangling edges (skipped): {}", summary.dangling_edges);
    }
    if summary.duplicate_nodes > 0 {
        println!("  Duplicate node ids (skipped): {}", summary.duplicate_nodes);
    }

    println!("\n  Nodes by kind:");
    for kc in &summary.nodes_by_kind {
        println!("    {:<15} {:>8}", kc.kind, kc.count);
    }
    println!("\n  Edges by type:");
    for kc in &summary.edges_by_type {
        println!("    {:<15} {:>8}", kc.kind, kc.count);
    }
    Ok(())
}

pub fn display_node(engine: &AnalysisEngine, id: &str) -> Result<()> {
    let node = engine
        .lookup_node(id)
        .ok_or_else(|| anyhow!("Node not found: {id}"))?;
    println!("{}", serde_json::to_string_pretty(&node)?);
    Ok(())
}

fn print_consumers(consumers: &[ConsumerDto], indent: &str, limit: Option<usize>) {
    let shown = limit.unwrap_or(consumers.len());
    for consumer in consumers.iter().take(shown) {
        println!(
            "{indent}- {:<10} [{:<10}]: {}",
            consumer.node.kind,
            consumer.role,
            label(&consumer.node)
        );
    }
    if consumers.len() > shown {
        println!("{indent}... and {} more", consumers.len() - shown);
    }
}

pub fn display_consumers(engine: &AnalysisEngine, value_id: &str) -> Result<()> {
    let result = engine.consumers_of(value_id)?;
    println!("Consumers of {value_id}:");
    if result.is_dead {
        println!("  (none: value is never read)");
    } else {
        print_consumers(&result.consumers, "  ", None);
    }
    Ok(())
}

pub fn display_returns(engine: &AnalysisEngine, method_id: &str) -> Result<()> {
    let result = engine.return_producers_of(method_id)?;
    println!("Method: {method_id}");
    println!("Pattern: {} ({})", result.pattern, result.pattern.describe());

    match &result.return_value {
        Some(slot) => {
            println!("Return Value: {}", label(slot));
            println!("  ID: {}", slot.id);
            if result.producers.is_empty() {
                println!("  WARNING: No produces edges!");
            } else {
                println!("\n  Produced by {} expression(s):", result.producers.len());
                for producer in &result.producers {
                    println!("    - {:<15}: {}", producer.kind, label(producer));
                }
            }
        }
        None => println!("WARNING: No return value found for this method"),
    }
    Ok(())
}

pub fn display_classification(engine: &AnalysisEngine, method_id: &str) -> Result<()> {
    let pattern = engine.classify(method_id);
    println!("{method_id}: {pattern} ({})", pattern.describe());
    Ok(())
}

fn print_case_group(case_num: usize, group: &CaseGroupDto) {
    print_banner(&format!("CASE #{case_num}: {}", group.callee_key));
    println!();

    println!("Callee Method: {}", label(&group.callee));
    println!("  ID: {}", group.callee.id);
    println!("  File: {}", group.callee.file.as_deref().unwrap_or("N/A"));
    match group.callee.line {
        Some(line) => println!("  Line: {line}"),
        None => println!("  Line: N/A"),
    }
    println!("  Pattern: {} ({})", group.pattern, group.pattern.describe());
    println!();

    println!("Return Value: {}", label(&group.return_value));
    println!("  ID: {}", group.return_value.id);
    if group.return_producers.is_empty() {
        println!("  WARNING: No produces edges!");
    } else {
        println!("\n  Produced by {} expression(s):", group.return_producers.len());
        for producer in &group.return_producers {
            println!("    - {:<15}: {}", producer.kind, label(producer));
        }
    }
    println!();

    println!("Call Sites ({}):", group.call_sites.len());
    for (idx, site) in group.call_sites.iter().enumerate() {
        println!("\n  Site #{}:", idx + 1);
        println!("    Local Value: {}", label(&site.local));
        println!("      ID: {}", site.local.id);
        println!("    Call: {}", label(&site.call));
        println!("      ID: {}", site.call.id);
        println!("    Result Value: {}", label(&site.result));
        println!("      ID: {}", site.result.id);
        println!("    Consumers of local ({}):", site.consumers.len());
        print_consumers(&site.consumers, "      ", Some(MAX_CONSUMERS_SHOWN));
    }
    println!();
}

pub fn display_cases(engine: &AnalysisEngine, limit: Option<usize>, as_json: bool) -> Result<()> {
    let result = engine.find_cross_method_cases(limit);
    if as_json {
        println!("{}", serde_json::to_string_pretty(&result)?);
        return Ok(());
    }

    print_banner("CROSS-METHOD RETURN BOUNDARY CASES");
    println!();
    println!(
        "Found {} call sites across {} unique callee methods",
        result.total_call_sites, result.total_callees
    );
    println!();

    for (idx, group) in result.groups.iter().enumerate() {
        print_case_group(idx + 1, group);
    }
    if result.groups.len() < result.total_callees {
        println!(
            "... and {} more callee methods",
            result.total_callees - result.groups.len()
        );
        println!();
    }

    print_banner("RETURN PATTERN ANALYSIS");
    println!();
    println!("Total callee methods: {}", result.total_callees);
    for entry in &result.pattern_summary {
        println!(
            "  {:<7} {:>5}  ({})",
            entry.pattern.as_str(),
            entry.callees.len(),
            entry.pattern.describe()
        );
    }
    Ok(())
}

pub fn display_trace(engine: &AnalysisEngine, value_id: &str) -> Result<()> {
    let trace = engine.trace(value_id, true)?;
    println!("Provenance of {}:", label(&trace.start));
    for hop in &trace.hops {
        println!(
            "  --{:<13}--> [{}] {}",
            hop.via,
            hop.to.kind,
            label(&hop.to)
        );
    }
    let end = match trace.terminus {
        TerminusKind::Expression => "expression",
        TerminusKind::Root => "unresolved root",
        TerminusKind::Cycle => "cycle",
    };
    println!("Ends at {end}: {}", label(&trace.end));
    Ok(())
}

pub fn display_inspect(engine: &AnalysisEngine, node_id: &str) -> Result<()> {
    let inspect = engine
        .inspect(node_id)
        .ok_or_else(|| anyhow!("Node not found: {node_id}"))?;

    print_banner(&format!("NODE: {}", label(&inspect.node)));
    println!("  ID: {}", inspect.node.id);
    println!("  Kind: {}", inspect.node.kind);
    if let Some(vk) = &inspect.node.value_kind {
        println!("  Value kind: {vk}");
    }
    println!("  File: {}", inspect.node.file.as_deref().unwrap_or("N/A"));

    for (title, edges, arrow) in [
        ("Incoming", &inspect.incoming, "<--"),
        ("Outgoing", &inspect.outgoing, "-->"),
    ] {
        println!("\n{title} edges ({}):", edges.len());
        for edge in edges {
            let param = edge
                .parameter
                .as_deref()
                .map(|p| format!(" [{p}]"))
                .unwrap_or_default();
            println!(
                "  {arrow} {:<13}{param} {} ({})",
                edge.kind,
                edge.neighbour_id,
                edge.neighbour_kind.as_deref().unwrap_or("unknown")
            );
        }
    }
    Ok(())
}

pub fn display_void_methods(engine: &AnalysisEngine) -> Result<()> {
    let result = engine.void_methods();
    println!("Methods without a return value that have callers:");
    println!("{}", "=".repeat(80));
    for entry in &result.methods {
        println!("  {:>4} caller(s)  {}", entry.callers, label(&entry.method));
    }
    println!("\nTotal: {}", result.methods.len());
    Ok(())
}

pub fn write_manifest(
    engine: &AnalysisEngine,
    seed: u64,
    count: usize,
    sot_id: &str,
    output: Option<&Path>,
) -> Result<()> {
    let manifest = engine.manifest(seed, count, sot_id);
    let json = serde_json::to_string_pretty(&manifest)?;

    match output {
        Some(path) => {
            std::fs::write(path, json + "\n")
                .with_context(|| format!("Failed to write manifest: {}", path.display()))?;
            println!("Written {} cases to {}", manifest.cases.len(), path.display());
            for (group, n) in &manifest.summary {
                println!("  {group}: {n} symbols");
            }
        }
        None => println!("{json}"),
    }
    Ok(())
}
