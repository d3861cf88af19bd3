use anyhow::{Context, Result};
use pantry_planner::cli::{parse_args, Command, LayoutCommand};
use pantry_planner::config::Config;
use pantry_planner::item_parser::{format_item_quantity, parse_item_quantity};
use pantry_planner::models::ShoppingItem;
use pantry_planner::shopping_list::{export_shopping_list_csv, ItemGroup, ToggleOutcome};
use pantry_planner::store::{load_pantry_csv, HouseholdData, JsonStore};
use tracing::{debug, error};
use tracing_subscriber::EnvFilter;

fn print_item(item: &ShoppingItem) {
    let mark = if item.checked { "x" } else { " " };
    let label = format_item_quantity(&item.name, item.quantity, item.unit.as_deref());
    match &item.source_name {
        Some(from) => println!(
            "  [{}] {}  <{}: {}>  ({})",
            mark,
            label,
            item.source.label(),
            from,
            item.id
        ),
        None => println!("  [{}] {}  <{}>  ({})", mark, label, item.source.label(), item.id),
    }
}

fn print_groups(groups: &[ItemGroup]) {
    if groups.iter().all(|g| g.items.is_empty()) {
        println!("Shopping list is empty.");
        return;
    }
    for group in groups {
        if let Some(title) = &group.title {
            println!("{}", title);
        }
        group.items.iter().for_each(print_item);
    }
}

fn run_layout_command(data: &mut HouseholdData, command: LayoutCommand) -> Result<bool> {
    match command {
        LayoutCommand::List => {
            let selected = data.state.selected_layout_id.as_deref();
            for layout in &data.layouts {
                let mut flags = Vec::new();
                if layout.is_default {
                    flags.push("default");
                }
                if selected == Some(layout.id.as_str()) {
                    flags.push("selected");
                }
                println!(
                    "{}  {}  [{}]  {}",
                    layout.id,
                    layout.name,
                    flags.join(","),
                    layout.category_order.join(" > ")
                );
            }
            Ok(false)
        }
        LayoutCommand::Add { name, categories, default } => {
            let categories = categories
                .into_iter()
                .map(|c| c.trim().to_string())
                .filter(|c| !c.is_empty())
                .collect();
            let layout = data.add_layout(&name, categories, default);
            println!("Added layout {} ({})", layout.name, layout.id);
            Ok(true)
        }
        LayoutCommand::Default { id } => {
            data.set_default_layout(&id)?;
            println!("Default layout is now {}", id);
            Ok(true)
        }
        LayoutCommand::Select { id } => {
            data.select_layout(id.as_deref())?;
            Ok(true)
        }
        LayoutCommand::Remove { id } => {
            let removed = data.remove_layout(&id)?;
            println!("Removed layout {}", removed.name);
            Ok(true)
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env()?;

    let filter = EnvFilter::try_new(&config.log_filter)
        .with_context(|| format!("Invalid log filter '{}'", config.log_filter))?;
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let cli = parse_args();
    let store = JsonStore::new(cli.data.unwrap_or_else(|| config.data_file.clone()));
    debug!("Using data file {:?}", store.path());

    if let Command::Parse { text } = &cli.command {
        println!("{}", serde_json::to_string_pretty(&parse_item_quantity(text))?);
        return Ok(());
    }

    let mut data = store
        .load()
        .await
        .with_context(|| format!("Failed to load household data from {:?}", store.path()))?;

    let changed = match cli.command {
        Command::Parse { .. } => false,
        Command::List { mode, layout, save } => {
            print_groups(&data.grouped_list(mode, layout.as_deref()));
            if save {
                if let Some(mode) = mode {
                    data.state.view_mode = mode;
                }
                if layout.is_some() {
                    data.select_layout(layout.as_deref())?;
                }
            }
            save
        }
        Command::TogglePlan { id } => {
            let selected = data.toggle_plan(&id)?;
            println!("Plan {} {}", id, if selected { "selected" } else { "deselected" });
            true
        }
        Command::ToggleRecipe { id } => {
            let selected = data.toggle_recipe(&id)?;
            println!("Recipe {} {}", id, if selected { "selected" } else { "deselected" });
            true
        }
        Command::Check { item_id } => {
            let mut session = data.session(config.feedback_delay);
            match session.toggle_item(&item_id).await {
                Ok(ToggleOutcome::Checked) => println!("Checked {}", item_id),
                Ok(ToggleOutcome::Unchecked) => println!("Unchecked {}", item_id),
                Ok(ToggleOutcome::Restocked { pantry_id }) => {
                    println!("Bought {}; pantry item {} restocked", item_id, pantry_id)
                }
                Err(e) => {
                    error!("Could not update {}: {}", item_id, e);
                    return Err(e.into());
                }
            }
            true
        }
        Command::Order { item_ids } => {
            data.set_custom_order(item_ids)?;
            true
        }
        Command::ImportPantry { csv } => {
            let items = load_pantry_csv(&csv)?;
            let summary = data.merge_pantry(items);
            println!("Imported pantry: {} added, {} updated", summary.added, summary.updated);
            true
        }
        Command::Export { csv, mode, layout } => {
            let rows = export_shopping_list_csv(&data.grouped_list(mode, layout.as_deref()), &csv)?;
            println!("Wrote {} items to {:?}", rows, csv);
            false
        }
        Command::Layout(command) => run_layout_command(&mut data, command)?,
    };

    if changed {
        store
            .save(&data)
            .await
            .with_context(|| format!("Failed to save household data to {:?}", store.path()))?;
    }

    Ok(())
}
