//! Plain-text transactional emails.
//!
//! Sending is best effort: [`deliver`] logs a failure and returns, so a mail
//! outage never fails the operation that triggered it.

use crate::domain::client::Client;
use crate::domain::foundation::Timestamp;
use crate::domain::store::{DeliveryOption, Purchase, PurchaseItem};
use crate::ports::{EmailMessage, EmailSender, Recipient};

const SIGNATURE: &str = "Best regards,\nThe Gym Portal Team";

/// Sends `message`, logging instead of propagating a failure.
pub async fn deliver(sender: &dyn EmailSender, message: EmailMessage, kind: &'static str) {
    let subject = message.subject.clone();
    match sender.send(message).await {
        Ok(()) => tracing::debug!(kind, %subject, "Notification sent"),
        Err(e) => tracing::warn!(kind, %subject, error = %e, "Failed to send notification"),
    }
}

pub fn welcome(client: &Client) -> EmailMessage {
    let text = format!(
        "Hello {first},\n\n\
         Welcome to Gym Portal! Your account has been created.\n\n\
         Account details:\n\
         - Name: {name}\n\
         - Email: {email}\n\n\
         Next steps:\n\
         1. Pay for your membership to unlock check-ins and the store\n\
         2. Keep your check-in QR code handy when you visit\n\n\
         {signature}",
        first = client.first_name(),
        name = client.full_name(),
        email = client.email(),
        signature = SIGNATURE,
    );
    EmailMessage {
        to: Recipient::Address(client.email().to_string()),
        subject: "Welcome to Gym Portal!".to_string(),
        text,
    }
}

pub fn membership_confirmation(client: &Client, reference: &str) -> EmailMessage {
    let membership = client.membership();
    let date = |ts: Option<Timestamp>| ts.map(|t| t.date_string()).unwrap_or_else(|| "-".into());
    let amount = membership
        .last_paid_amount
        .map(|m| m.to_string())
        .unwrap_or_else(|| "-".into());

    let text = format!(
        "Hello {first},\n\n\
         Your membership payment has been received.\n\n\
         Status: {status}\n\
         Amount: {amount}\n\
         Payment date: {paid}\n\
         Valid until: {due}\n\
         Reference: {reference}\n\n\
         {signature}",
        first = client.first_name(),
        status = membership.status,
        amount = amount,
        paid = date(membership.paid_date),
        due = date(membership.due_date),
        reference = reference,
        signature = SIGNATURE,
    );
    EmailMessage {
        to: Recipient::Address(client.email().to_string()),
        subject: "Membership Payment Confirmed".to_string(),
        text,
    }
}

/// `• {name} x {qty} - ₦{line total}`
pub fn render_line(item: &PurchaseItem) -> String {
    format!("• {} x {} - {}", item.item_name, item.quantity, item.total_price)
}

fn render_lines(purchase: &Purchase) -> String {
    purchase
        .items()
        .iter()
        .map(render_line)
        .collect::<Vec<_>>()
        .join("\n")
}

fn delivery_summary(purchase: &Purchase) -> String {
    match (purchase.delivery_option(), purchase.delivery_address()) {
        (DeliveryOption::Delivery, Some(address)) => format!("DELIVERY to {}", address),
        (option, _) => option.as_str().to_string(),
    }
}

pub fn purchase_confirmation(client: &Client, purchase: &Purchase) -> EmailMessage {
    let follow_up = match purchase.delivery_option() {
        DeliveryOption::Pickup => "Your order is ready for pickup at the front desk.",
        DeliveryOption::Delivery => "We will contact you to arrange delivery.",
    };
    let text = format!(
        "Hello {first},\n\n\
         Thank you for your purchase.\n\n\
         Order #{id}\n\
         {lines}\n\n\
         Total: {total}\n\
         Delivery: {delivery}\n\
         Reference: {reference}\n\n\
         {follow_up}\n\n\
         {signature}",
        first = client.first_name(),
        id = purchase.id(),
        lines = render_lines(purchase),
        total = purchase.total_amount(),
        delivery = delivery_summary(purchase),
        reference = purchase.payment_reference(),
        follow_up = follow_up,
        signature = SIGNATURE,
    );
    EmailMessage {
        to: Recipient::Address(client.email().to_string()),
        subject: format!("Purchase Confirmation - Order #{}", purchase.id()),
        text,
    }
}

pub fn purchase_notification(client: &Client, purchase: &Purchase) -> EmailMessage {
    let text = format!(
        "A new purchase has been paid.\n\n\
         Customer: {name}\n\
         Email: {email}\n\n\
         Order #{id}\n\
         {lines}\n\n\
         Total: {total}\n\
         Delivery: {delivery}\n\
         Reference: {reference}\n\n\
         Action required: prepare the order for {action}.",
        name = client.full_name(),
        email = client.email(),
        id = purchase.id(),
        lines = render_lines(purchase),
        total = purchase.total_amount(),
        delivery = delivery_summary(purchase),
        reference = purchase.payment_reference(),
        action = match purchase.delivery_option() {
            DeliveryOption::Pickup => "pickup",
            DeliveryOption::Delivery => "delivery",
        },
    );
    EmailMessage {
        to: Recipient::Admin,
        subject: format!("New Purchase - Order #{}", purchase.id()),
        text,
    }
}

pub fn password_reset(client: &Client, frontend_url: &str, token: &str) -> EmailMessage {
    let link = format!(
        "{}/auth/reset-password/{}",
        frontend_url.trim_end_matches('/'),
        token
    );
    let text = format!(
        "Hello {first},\n\n\
         We received a request to reset your password. Use the link below\n\
         within the next hour:\n\n\
         {link}\n\n\
         If you did not ask for this, you can ignore this email.\n\n\
         {signature}",
        first = client.first_name(),
        link = link,
        signature = SIGNATURE,
    );
    EmailMessage {
        to: Recipient::Address(client.email().to_string()),
        subject: "Password Reset Request".to_string(),
        text,
    }
}
