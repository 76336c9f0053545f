use crate::infra::{seed_directory, Collaborators};
use clap::Args;
use food_donation::donations::{
    Donation, DonationDetails, DonationDraft, DonationLifecycleManager, DonationServiceError,
    DonorId, InMemoryOutbox, NgoId, NgoRef,
};
use food_donation::error::AppError;
use std::sync::Arc;

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Skip the update and ownership-check portion of the demo.
    #[arg(long)]
    pub(crate) skip_updates: bool,
    /// Print compact JSON instead of pretty-printed records.
    #[arg(long)]
    pub(crate) compact: bool,
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let DemoArgs {
        skip_updates,
        compact,
    } = args;

    let collaborators = Collaborators::default();
    seed_directory(&collaborators.directory).map_err(DonationServiceError::from)?;
    let outbox = Arc::new(InMemoryOutbox::default());
    let manager = collaborators.manager(outbox.clone());

    println!("Food donation demo");

    println!("\nMoney donation (auto-completed)");
    let money = manager.create_donation(DonorId(1), money_draft("2500", 1))?;
    print_donation(&money, compact);

    println!("\nFood donation (pending pickup)");
    let food = manager.create_donation(DonorId(2), food_draft())?;
    print_donation(&food, compact);

    if !skip_updates {
        run_update_walkthrough(&manager, &food, compact)?;
    }

    println!("\nDonations routed to NGO 1");
    for donation in manager.list_by_ngo(NgoId(1))? {
        print_donation(&donation, compact);
    }

    let messages = outbox.messages();
    if messages.is_empty() {
        println!("\nReceipts: none dispatched");
    } else {
        println!("\nReceipts");
        for message in messages {
            println!("  To: {}\n  Subject: {}", message.to, message.subject);
            for line in message.body.lines() {
                println!("    {line}");
            }
        }
    }

    Ok(())
}

fn run_update_walkthrough(
    manager: &DonationLifecycleManager,
    food: &Donation,
    compact: bool,
) -> Result<(), AppError> {
    let Some(donation_id) = food.id else {
        return Ok(());
    };

    let mut changes = food_draft();
    changes.details.quantity = Some("40 plates".to_string());
    changes.ngo = Some(NgoRef { id: 1 });

    println!("\nUpdate attempted by a different donor");
    match manager.update_donation(donation_id, DonorId(3), changes.clone()) {
        Err(DonationServiceError::NotAllowed) => println!("  Rejected: Not allowed"),
        Err(err) => return Err(err.into()),
        Ok(_) => println!("  Unexpectedly accepted"),
    }

    println!("\nUpdate by the owner");
    let updated = manager.update_donation(donation_id, food.donor.id, changes)?;
    print_donation(&updated, compact);
    Ok(())
}

fn money_draft(amount: &str, ngo_id: i32) -> DonationDraft {
    DonationDraft {
        details: DonationDetails {
            donation_type: Some("MONEY".to_string()),
            amount: Some(amount.to_string()),
            ..DonationDetails::default()
        },
        ngo: Some(NgoRef { id: ngo_id }),
        ..DonationDraft::default()
    }
}

fn food_draft() -> DonationDraft {
    DonationDraft {
        details: DonationDetails {
            donation_type: Some("FOOD".to_string()),
            food_name: Some("Vegetable biryani".to_string()),
            meal_type: Some("Dinner".to_string()),
            category: Some("Cooked".to_string()),
            quantity: Some("25 plates".to_string()),
            city: Some("Bengaluru".to_string()),
            ..DonationDetails::default()
        },
        ..DonationDraft::default()
    }
}

fn print_donation(donation: &Donation, compact: bool) {
    let rendered = if compact {
        serde_json::to_string(donation)
    } else {
        serde_json::to_string_pretty(donation)
    };
    match rendered {
        Ok(json) => println!("{json}"),
        Err(err) => println!("  Donation unavailable: {err}"),
    }
}
