use std::sync::Arc;

use log::debug;
use recipe_planner::search::{page_count, paginate};
use recipe_planner::{
    build_app, AppConfig, Command, Error, IngredientLine, ItemId, LikedRecipe, Panel, Recipe,
    RecipeSummary, ServingsChange, ShoppingItem, View,
};
use tokio::io::{AsyncBufReadExt, BufReader};

const TITLE_LIMIT: usize = 17;

const HELP: &str = "\
Commands:
  search <text>        search recipes
  page <n>             show page n of the results
  open <id|#id>        load a recipe
  + / -                increase / decrease servings
  add                  add the recipe's ingredients to the shopping list
  like                 like or unlike the recipe
  count <item> <n>     set a shopping list quantity
  delete <item>        remove a shopping list entry
  help                 show this help
  quit                 exit";

enum Input {
    Command(Command),
    Help,
    Quit,
}

/// Prints everything the controller renders to stdout
struct ConsoleView {
    results_per_page: usize,
}

impl View for ConsoleView {
    fn show_loading(&self, panel: Panel) {
        match panel {
            Panel::SearchResults => println!("Searching..."),
            Panel::Recipe => println!("Loading recipe..."),
        }
    }

    fn hide_loading(&self, panel: Panel) {
        debug!("{:?} loaded", panel);
    }

    fn render_search_results(&self, results: &[RecipeSummary], page: usize) {
        let pages = page_count(results.len(), self.results_per_page);
        let shown = paginate(results, page, self.results_per_page);
        if shown.is_empty() {
            println!("No results on page {page}");
            return;
        }
        for summary in shown {
            println!(
                "  #{:<8} {} ({})",
                summary.id,
                limit_title(&summary.title, TITLE_LIMIT),
                summary.author
            );
        }
        println!("Page {page} of {pages}");
    }

    fn highlight_selected(&self, id: &str) {
        println!("Selected #{id}");
    }

    fn render_recipe(&self, recipe: &Recipe, is_liked: bool) {
        let heart = if is_liked { "♥" } else { "♡" };
        println!("{} {} by {}", heart, recipe.title, recipe.author);
        println!(
            "  {} minutes, {} servings, {}",
            recipe.cook_time_minutes, recipe.servings, recipe.source_url
        );
        print_ingredients(&recipe.ingredients);
    }

    fn update_servings(&self, recipe: &Recipe) {
        println!("Now {} servings", recipe.servings);
        print_ingredients(&recipe.ingredients);
    }

    fn render_shopping_item(&self, item: &ShoppingItem) {
        println!(
            "  [{}] {}",
            item.id,
            describe(item.quantity, item.unit.as_deref(), &item.name)
        );
    }

    fn remove_shopping_item(&self, id: &ItemId) {
        println!("Removed {id}");
    }

    fn render_like(&self, like: &LikedRecipe) {
        println!(
            "  ♥ #{} {} ({})",
            like.id,
            limit_title(&like.title, TITLE_LIMIT),
            like.author
        );
    }

    fn remove_like(&self, id: &str) {
        println!("Unliked #{id}");
    }

    fn set_like_button(&self, liked: bool) {
        println!("{}", if liked { "♥ Liked" } else { "♡ Not liked" });
    }

    fn set_like_count(&self, count: usize) {
        println!("{count} liked recipes");
    }

    fn alert(&self, message: &str) {
        eprintln!("! {message}");
    }
}

fn print_ingredients(ingredients: &[IngredientLine]) {
    for ingredient in ingredients {
        println!(
            "  - {}",
            describe(ingredient.quantity, ingredient.unit.as_deref(), &ingredient.name)
        );
    }
}

fn describe(quantity: Option<f64>, unit: Option<&str>, name: &str) -> String {
    let mut parts = Vec::new();
    if let Some(quantity) = quantity {
        parts.push(format_quantity(quantity));
    }
    if let Some(unit) = unit {
        parts.push(unit.to_string());
    }
    parts.push(name.to_string());
    parts.join(" ")
}

fn format_quantity(quantity: f64) -> String {
    let rounded = format!("{quantity:.2}");
    rounded.trim_end_matches('0').trim_end_matches('.').to_string()
}

/// Shorten a title to whole words fitting in `limit` characters
fn limit_title(title: &str, limit: usize) -> String {
    if title.chars().count() <= limit {
        return title.to_string();
    }

    let mut kept = Vec::new();
    let mut length = 0;
    for word in title.split_whitespace() {
        length += word.chars().count();
        if length > limit {
            break;
        }
        kept.push(word);
    }
    if kept.is_empty() {
        // A single overlong word is cut by characters
        let cut: String = title.trim_start().chars().take(limit).collect();
        return format!("{cut} ...");
    }
    format!("{} ...", kept.join(" "))
}

fn parse_input(line: &str) -> Result<Option<Input>, String> {
    let line = line.trim();
    let (word, rest) = line.split_once(char::is_whitespace).unwrap_or((line, ""));
    let rest = rest.trim();

    let input = match word {
        "" => return Ok(None),
        "help" | "?" => Input::Help,
        "quit" | "exit" => Input::Quit,
        "search" => Input::Command(Command::SubmitSearch(rest.to_string())),
        "page" => {
            let page = rest
                .parse()
                .map_err(|_| format!("Not a page number: {rest:?}"))?;
            Input::Command(Command::GoToPage(page))
        }
        "open" => Input::Command(Command::Navigate(rest.to_string())),
        "+" => Input::Command(Command::ChangeServings(ServingsChange::Increase)),
        "-" => Input::Command(Command::ChangeServings(ServingsChange::Decrease)),
        "add" => Input::Command(Command::AddToList),
        "like" => Input::Command(Command::ToggleLike),
        "count" => {
            let (id, value) = rest
                .split_once(char::is_whitespace)
                .ok_or("Usage: count <item> <n>")?;
            let id = parse_item_id(id)?;
            let value = value
                .trim()
                .parse()
                .map_err(|_| format!("Not a number: {:?}", value.trim()))?;
            Input::Command(Command::UpdateCount(id, value))
        }
        "delete" => Input::Command(Command::DeleteItem(parse_item_id(rest)?)),
        other => return Err(format!("Unknown command {other:?}, try `help`")),
    };
    Ok(Some(input))
}

fn parse_item_id(text: &str) -> Result<ItemId, String> {
    text.parse()
        .map_err(|_| format!("Not a shopping list item: {text:?}"))
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    env_logger::init();

    let config = AppConfig::load()?;
    let view = Arc::new(ConsoleView {
        results_per_page: config.results_per_page,
    });
    let app = build_app(&config, view)?;
    app.start().await;
    println!("{HELP}");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        match parse_input(&line) {
            Ok(Some(Input::Command(command))) => app.dispatch(command).await,
            Ok(Some(Input::Help)) => println!("{HELP}"),
            Ok(Some(Input::Quit)) => break,
            Ok(None) => {}
            Err(message) => eprintln!("{message}"),
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_limit_title() {
        assert_eq!(limit_title("Pasta", TITLE_LIMIT), "Pasta");
        assert_eq!(
            limit_title("Pasta with tomato and spinach", TITLE_LIMIT),
            "Pasta with tomato ..."
        );
        assert_eq!(
            limit_title("Supercalifragilisticexpialidocious pie", TITLE_LIMIT),
            "Supercalifragilis ..."
        );
    }

    #[test]
    fn test_format_quantity() {
        assert_eq!(format_quantity(2.0), "2");
        assert_eq!(format_quantity(1.5), "1.5");
        assert_eq!(format_quantity(1.0 / 3.0), "0.33");
    }

    #[test]
    fn test_parse_input() {
        assert!(matches!(
            parse_input("search  pizza pie "),
            Ok(Some(Input::Command(Command::SubmitSearch(q)))) if q == "pizza pie"
        ));
        assert!(matches!(
            parse_input("page 2"),
            Ok(Some(Input::Command(Command::GoToPage(2))))
        ));
        assert!(matches!(parse_input("   "), Ok(None)));
        assert!(matches!(parse_input("quit"), Ok(Some(Input::Quit))));
        assert!(parse_input("page two").is_err());
        assert!(parse_input("delete nope").is_err());
        assert!(parse_input("dance").is_err());
    }

    #[test]
    fn test_parse_count() {
        let id = "67e55044-10b1-426f-9247-bb680e5fe0c8";
        match parse_input(&format!("count {id} -2.5")) {
            Ok(Some(Input::Command(Command::UpdateCount(parsed, value)))) => {
                assert_eq!(parsed.to_string(), id);
                assert_eq!(value, -2.5);
            }
            _ => panic!("expected an UpdateCount command"),
        }
    }
}
