//! Work command: an hourly random payout.

use crate::descriptor::{Category, CommandDescriptor};
use crate::embeds::{GREEN, ORANGE};
use crate::framework::{Context, Error};
use crate::invocation::guarded;
use chrono::{DateTime, Utc};
use drack_common::{
    can_claim, claim_remaining, format_duration, format_number, random_element, random_int, UserId,
};
use drack_store::{BalanceUpdate, RecordStore, StoreResult, UserBalance};
use poise::serenity_prelude::{CreateEmbed, CreateEmbedFooter, Timestamp};
use poise::CreateReply;
use std::time::Duration;
use tracing::info;

/// A job and its pay range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Job {
    /// Display name.
    pub name: &'static str,
    /// Lowest base pay.
    pub min: i64,
    /// Highest base pay.
    pub max: i64,
    /// Emoji shown in the title.
    pub emoji: &'static str,
}

/// Jobs a shift is drawn from.
pub const JOBS: [Job; 8] = [
    Job { name: "Developer", min: 50, max: 150, emoji: "💻" },
    Job { name: "Teacher", min: 40, max: 120, emoji: "👨‍🏫" },
    Job { name: "Doctor", min: 80, max: 200, emoji: "👨‍⚕️" },
    Job { name: "Chef", min: 45, max: 130, emoji: "👨‍🍳" },
    Job { name: "Artist", min: 35, max: 140, emoji: "🎨" },
    Job { name: "Musician", min: 40, max: 160, emoji: "🎵" },
    Job { name: "Streamer", min: 60, max: 180, emoji: "🎮" },
    Job { name: "Athlete", min: 70, max: 190, emoji: "⚽" },
];

/// Chance of a bonus on top of the base pay.
pub const BONUS_CHANCE: f64 = 0.1;

/// Minimum time between shifts.
pub fn work_window() -> chrono::Duration {
    chrono::Duration::hours(1)
}

/// One drawn shift.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Shift {
    /// Job worked.
    pub job: Job,
    /// Base pay.
    pub earnings: i64,
    /// Bonus pay, 0 when unlucky.
    pub bonus: i64,
}

impl Shift {
    /// Base pay plus bonus.
    pub const fn total(&self) -> i64 {
        self.earnings + self.bonus
    }
}

/// Draws a job, its pay and the bonus roll.
pub fn draw_shift(rng: &mut fastrand::Rng) -> Shift {
    let job = *random_element(rng, &JOBS).unwrap_or(&JOBS[0]);
    let earnings = random_int(rng, job.min, job.max);
    let bonus = if rng.f64() < BONUS_CHANCE { earnings / 2 } else { 0 };
    Shift { job, earnings, bonus }
}

/// Result of a work attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WorkOutcome {
    /// The shift was paid; the balance after payment.
    Worked(Shift, UserBalance),
    /// Worked too recently; time until the next shift.
    Tired(Duration),
}

/// Pays `shift` unless the user worked within the last hour.
pub async fn perform_work(
    store: &dyn RecordStore,
    user: UserId,
    shift: Shift,
    now: DateTime<Utc>,
) -> StoreResult<WorkOutcome> {
    let balance = store.get_balance(user).await?;

    if !can_claim(balance.last_work, work_window(), now) {
        return Ok(WorkOutcome::Tired(claim_remaining(
            balance.last_work,
            work_window(),
            now,
        )));
    }

    let update = BalanceUpdate::default()
        .coins(balance.coins + shift.total())
        .last_work(now);
    let balance = store.update_balance(user, update).await?;
    info!(user = %user, job = shift.job.name, total = shift.total(), "Shift worked");
    Ok(WorkOutcome::Worked(shift, balance))
}

/// Registry entry for `/work`.
pub fn descriptor() -> CommandDescriptor {
    CommandDescriptor::new("work", "Work to earn coins")
        .category(Category::Economy)
        .cooldown(5)
}

/// Work to earn coins
#[poise::command(slash_command)]
pub async fn work(ctx: Context<'_>) -> Result<(), Error> {
    guarded(ctx, move || work_shift(ctx)).await
}

async fn work_shift(ctx: Context<'_>) -> Result<(), Error> {
    let user = UserId(ctx.author().id.get());
    let shift = draw_shift(&mut fastrand::Rng::new());
    let outcome = perform_work(ctx.data().store.as_ref(), user, shift, Utc::now()).await?;

    ctx.send(CreateReply::default().embed(work_embed(&outcome)))
        .await?;
    Ok(())
}

fn work_embed(outcome: &WorkOutcome) -> CreateEmbed {
    match outcome {
        WorkOutcome::Tired(remaining) => CreateEmbed::new()
            .colour(ORANGE)
            .description(format!(
                "⏰ You're tired! Rest for **{}** before working again.",
                format_duration(*remaining)
            ))
            .footer(CreateEmbedFooter::new("You can work once per hour")),
        WorkOutcome::Worked(shift, balance) => {
            let mut embed = CreateEmbed::new()
                .colour(GREEN)
                .title(format!("{} Work Complete!", shift.job.emoji))
                .description(format!("You worked as a **{}** and earned:", shift.job.name))
                .field(
                    "💰 Base Earnings",
                    format!("{} coins", format_number(shift.earnings)),
                    true,
                );
            if shift.bonus > 0 {
                embed = embed
                    .field("✨ Bonus!", format!("+{} coins", format_number(shift.bonus)), true)
                    .footer(CreateEmbedFooter::new("Lucky! You got a bonus!"));
            }
            embed
                .field(
                    "📊 Total",
                    format!("**{} coins**", format_number(shift.total())),
                    false,
                )
                .field(
                    "💼 Your Balance",
                    format!("{} coins", format_number(balance.coins)),
                    false,
                )
                .timestamp(Timestamp::now())
        }
    }
}
