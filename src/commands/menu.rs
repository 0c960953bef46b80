//! Interactive CRUD menu over the orders table

use anyhow::Result;
use chrono::Local;
use colored::*;
use log::{debug, info};
use std::time::Duration;

use crate::orders::{OrderDraft, OrderError, OrderRecord, OrderRepository};
use crate::ui::prompts::{Prompter, confirm_yes, prompt_amount, prompt_number};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    Create,
    Read,
    Update,
    Delete,
    Exit,
    Invalid,
}

impl MenuChoice {
    pub fn parse(input: &str) -> Self {
        match input.trim() {
            "1" => MenuChoice::Create,
            "2" => MenuChoice::Read,
            "3" => MenuChoice::Update,
            "4" => MenuChoice::Delete,
            "5" => MenuChoice::Exit,
            _ => MenuChoice::Invalid,
        }
    }
}

fn display_menu() {
    println!("\n{}", "=".repeat(40));
    println!(" {}", "E-Commerce Data Management System".bold());
    println!("{}", "=".repeat(40));
    println!("1. CREATE (Add New Order)");
    println!("2. READ (Fetch Order by ID)");
    println!("3. UPDATE (Modify Order Revenue)");
    println!("4. DELETE (Remove Order)");
    println!("5. Exit");
    println!("{}", "-".repeat(40));
}

fn display_order(order: Option<&OrderRecord>) {
    match order {
        Some(order) => {
            println!("\n{}", "Order Found:".green().bold());
            for (name, value) in order.fields() {
                println!("  {}: {}", name, value);
            }
        }
        None => println!("{} Order not found.", "[WARNING]".yellow().bold()),
    }
}

fn report_error(action: &str, order_id: i64, err: &OrderError) {
    println!(
        "\n{} Could not {} Order ID {}: {}",
        "[ERROR]".red().bold(),
        action,
        order_id,
        err
    );
}

/// Run the menu until the operator picks Exit or input runs out
pub async fn run_menu(
    repo: &OrderRepository,
    prompter: &mut dyn Prompter,
    pacing: Duration,
) -> Result<()> {
    let max_id = repo.max_order_id().await;
    println!(
        "{} Current max Order ID in table: {}",
        "[INFO]".blue().bold(),
        max_id
    );

    loop {
        display_menu();
        let choice = MenuChoice::parse(&prompter.text("Enter your choice (1-5)")?);
        debug!("Menu choice: {:?}", choice);

        match choice {
            MenuChoice::Create => handle_create(repo, prompter).await?,
            MenuChoice::Read => handle_read(repo, prompter).await?,
            MenuChoice::Update => handle_update(repo, prompter).await?,
            MenuChoice::Delete => handle_delete(repo, prompter).await?,
            MenuChoice::Exit => {
                println!("\nExiting the E-Commerce Data Management System. Goodbye!");
                info!("Menu exited");
                return Ok(());
            }
            MenuChoice::Invalid => println!(
                "{} Invalid choice. Please select a number from 1 to 5.",
                "[WARNING]".yellow().bold()
            ),
        }

        if !pacing.is_zero() {
            tokio::time::sleep(pacing).await;
        }
    }
}

/// Collect a new order and insert it under max Order_ID + 1.
///
/// The ID is read right before the insert and is not reserved, so two
/// operators creating at the same time can collide on the primary key.
pub async fn handle_create(repo: &OrderRepository, prompter: &mut dyn Prompter) -> Result<()> {
    let max_id = repo.max_order_id().await;
    let Some(new_id) = max_id.checked_add(1) else {
        println!(
            "\n{} Cannot allocate a new Order ID: current max {} is the largest possible ID.",
            "[ERROR]".red().bold(),
            max_id
        );
        return Ok(());
    };
    println!("\n--- CREATE: Adding Order ID {} ---", new_id);

    let draft = OrderDraft {
        order_id: Some(new_id),
        order_date: Some(Local::now().date_naive()),
        customer_id: Some(prompter.text("Enter Customer ID (e.g., CUST-123)")?.trim().to_string()),
        region: Some(prompter.text("Enter Region (e.g., North, East)")?.trim().to_string()),
        payment_method: Some(prompter.text("Enter Payment Method")?.trim().to_string()),
        revenue: Some(prompt_amount(prompter, "Enter Revenue")?),
        quantity: Some(prompt_number::<i64>(prompter, "Enter Quantity")?),
        email: Some(prompter.text("Enter Customer Email")?.trim().to_string()),
    };

    match repo.create(draft).await {
        Ok(()) => println!(
            "\n{} New Order ID {} created.",
            "[SUCCESS]".green().bold(),
            new_id
        ),
        Err(err) => report_error("create", new_id, &err),
    }

    Ok(())
}

pub async fn handle_read(repo: &OrderRepository, prompter: &mut dyn Prompter) -> Result<()> {
    let order_id: i64 = prompt_number(prompter, "Enter Order ID to fetch")?;

    match repo.fetch_by_id(order_id).await {
        Ok(order) => display_order(order.as_ref()),
        Err(err) => report_error("fetch", order_id, &err),
    }

    Ok(())
}

pub async fn handle_update(repo: &OrderRepository, prompter: &mut dyn Prompter) -> Result<()> {
    let order_id: i64 = prompt_number(prompter, "Enter Order ID to update")?;
    let new_revenue = prompt_amount(prompter, "Enter new Revenue value")?;

    match repo.update_revenue(order_id, new_revenue).await {
        Ok(0) => println!(
            "\n{} Order ID {} does not exist.",
            "[FAILURE]".red().bold(),
            order_id
        ),
        Ok(_) => {
            println!("\n{} Order ID {} updated.", "[SUCCESS]".green().bold(), order_id);
            match repo.fetch_by_id(order_id).await {
                Ok(order) => display_order(order.as_ref()),
                Err(err) => report_error("fetch", order_id, &err),
            }
        }
        Err(err) => report_error("update", order_id, &err),
    }

    Ok(())
}

/// Delete after an explicit "yes"; anything else cancels without touching
/// the database
pub async fn handle_delete(repo: &OrderRepository, prompter: &mut dyn Prompter) -> Result<()> {
    let order_id: i64 = prompt_number(prompter, "Enter Order ID to DELETE")?;

    let prompt = format!("Are you sure you want to delete Order ID {}? (yes/no)", order_id);
    if !confirm_yes(prompter, &prompt)? {
        println!("{} Deletion cancelled.", "[INFO]".blue().bold());
        return Ok(());
    }

    match repo.delete(order_id).await {
        Ok(0) => println!(
            "\n{} Order ID {} does not exist.",
            "[FAILURE]".red().bold(),
            order_id
        ),
        Ok(_) => println!(
            "\n{} Order ID {} deleted successfully.",
            "[SUCCESS]".green().bold(),
            order_id
        ),
        Err(err) => report_error("delete", order_id, &err),
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_menu_choice_parse() {
        assert_eq!(MenuChoice::parse("1"), MenuChoice::Create);
        assert_eq!(MenuChoice::parse(" 2 "), MenuChoice::Read);
        assert_eq!(MenuChoice::parse("3"), MenuChoice::Update);
        assert_eq!(MenuChoice::parse("4"), MenuChoice::Delete);
        assert_eq!(MenuChoice::parse("5"), MenuChoice::Exit);
        assert_eq!(MenuChoice::parse("6"), MenuChoice::Invalid);
        assert_eq!(MenuChoice::parse("exit"), MenuChoice::Invalid);
    }
}
