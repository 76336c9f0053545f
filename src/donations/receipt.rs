use super::domain::Donation;
use super::notifier::EmailMessage;

pub const RECEIPT_SUBJECT: &str = "Donation Receipt - Thank You!";

const UNSET: &str = "N/A";

/// Thank-you receipt for an auto-completed money donation, addressed to its donor.
pub fn money_receipt(donation: &Donation) -> EmailMessage {
    let donor = &donation.donor;
    let amount = donation.details.amount.as_deref().unwrap_or(UNSET);
    let ngo = donation.ngo_name().unwrap_or(UNSET);

    let body = format!(
        "Dear {name},\n\n\
         Thank you for your generous donation of ₹{amount}.\n\
         Your support helps us serve the community better.\n\n\
         Donation Details:\n\
         Amount: ₹{amount}\n\
         NGO: {ngo}\n\
         Status: COMPLETED\n\n\
         Regards,\n\
         Food Donation Team",
        name = donor.name,
    );

    EmailMessage {
        to: donor.email.clone(),
        subject: RECEIPT_SUBJECT.to_string(),
        body,
    }
}
