//! Run Controller: one full scan pass over the source channels.
//!
//! Orchestration only — every decision lives in the component crates. The
//! controller owns the explicit [`RunState`] (caps, within-run dedup set,
//! skip tally) so cap enforcement is deterministic and unit-testable
//! against an in-memory gateway.

use std::collections::{BTreeMap, HashSet};
use std::time::Duration;

use chrono::Utc;

use dealrelay_affiliate::AffiliateResolver;
use dealrelay_core::{AppConfig, CandidateMessage, SkipReason};
use dealrelay_deals::{classify, extract_links, parse_hints, ClassifyPolicy, RedirectResolver};
use dealrelay_rewrite::{extract_tagged_ids, CopyRewriter};
use dealrelay_telegram::MessageGateway;

/// Per-channel skip-reason counts, keyed by stable reason code for
/// deterministic summary output.
#[derive(Debug, Default)]
pub struct SkipTally {
    per_channel: BTreeMap<String, BTreeMap<&'static str, usize>>,
}

impl SkipTally {
    fn record(&mut self, channel: &str, reason: SkipReason) {
        *self
            .per_channel
            .entry(channel.to_owned())
            .or_default()
            .entry(reason.code())
            .or_insert(0) += 1;
    }

    #[must_use]
    pub fn count(&self, channel: &str, reason: SkipReason) -> usize {
        self.per_channel
            .get(channel)
            .and_then(|m| m.get(reason.code()))
            .copied()
            .unwrap_or(0)
    }

    #[must_use]
    pub fn total(&self) -> usize {
        self.per_channel
            .values()
            .flat_map(BTreeMap::values)
            .sum()
    }

    fn log_summary(&self) {
        for (channel, reasons) in &self.per_channel {
            for (reason, count) in reasons {
                tracing::info!(channel = %channel, reason = %reason, count, "skip tally");
            }
        }
    }
}

/// Process-scoped run state; initialized at run start, discarded at run
/// end. Cross-run memory is only what [`RunState::history_ids`] carries in
/// from the destination channel's recent history.
struct RunState {
    published: usize,
    handled_ids: HashSet<String>,
    history_ids: HashSet<String>,
    tally: SkipTally,
}

/// What one run did, for the caller's exit logging.
#[derive(Debug)]
pub struct RunReport {
    pub published: usize,
    pub skipped: usize,
    pub tally: SkipTally,
}

pub struct RunController<'a> {
    config: &'a AppConfig,
    gateway: &'a dyn MessageGateway,
    redirects: &'a RedirectResolver,
    affiliates: &'a AffiliateResolver,
    rewriter: &'a CopyRewriter,
    policy: ClassifyPolicy,
}

impl<'a> RunController<'a> {
    pub fn new(
        config: &'a AppConfig,
        gateway: &'a dyn MessageGateway,
        redirects: &'a RedirectResolver,
        affiliates: &'a AffiliateResolver,
        rewriter: &'a CopyRewriter,
    ) -> Self {
        Self {
            config,
            gateway,
            redirects,
            affiliates,
            rewriter,
            policy: ClassifyPolicy::from_config(config),
        }
    }

    /// Runs one full scan pass.
    ///
    /// Never fails: collaborator errors degrade to per-candidate or
    /// per-channel skips. Configuration errors are the caller's problem and
    /// were ruled out before construction.
    pub async fn execute(&self) -> RunReport {
        tracing::info!(config = ?self.config, "preflight");

        let mut state = RunState {
            published: 0,
            handled_ids: HashSet::new(),
            history_ids: self.load_history().await,
            tally: SkipTally::default(),
        };

        'channels: for channel in &self.config.source_channels {
            tracing::info!(channel = %channel, "scanning channel");

            let messages = match self
                .gateway
                .recent_messages(channel, self.config.max_messages_per_channel)
                .await
            {
                Ok(messages) => messages,
                Err(e) => {
                    tracing::error!(channel = %channel, error = %e, "channel fetch failed");
                    continue;
                }
            };

            for message in &messages {
                if state.published >= self.config.max_posts_per_run {
                    tracing::info!(
                        cap = self.config.max_posts_per_run,
                        "publish cap reached, stopping scan"
                    );
                    break 'channels;
                }

                match self.process_candidate(message, &mut state).await {
                    Ok(()) => {
                        state.published += 1;
                        // Cooldown applies between successful publishes
                        // only, never after skips.
                        if !self.config.dry_run && self.config.post_cooldown_secs > 0 {
                            tokio::time::sleep(Duration::from_secs(
                                self.config.post_cooldown_secs,
                            ))
                            .await;
                        }
                    }
                    Err(reason) => {
                        tracing::info!(
                            channel = %message.channel,
                            message_id = message.id,
                            reason = %reason,
                            "candidate skipped"
                        );
                        state.tally.record(channel, reason);
                    }
                }
            }
        }

        state.tally.log_summary();
        RunReport {
            published: state.published,
            skipped: state.tally.total(),
            tally: state.tally,
        }
    }

    /// Seeds cross-run dedup from the destination channel's recent tags.
    /// Failure here degrades to within-run dedup only.
    async fn load_history(&self) -> HashSet<String> {
        match self
            .gateway
            .destination_history(&self.config.target_channel, self.config.history_scan_depth)
            .await
        {
            Ok(texts) => {
                let ids: HashSet<String> = texts
                    .iter()
                    .flat_map(|text| extract_tagged_ids(text))
                    .collect();
                tracing::info!(count = ids.len(), "destination history loaded");
                ids
            }
            Err(e) => {
                tracing::warn!(
                    error = %e,
                    "history load failed; cross-run dedup disabled for this run"
                );
                HashSet::new()
            }
        }
    }

    /// Full pipeline for one candidate: extract, classify, resolve, rewrite,
    /// guard, publish. Returns the skip reason of the first stage that
    /// rejects.
    async fn process_candidate(
        &self,
        message: &CandidateMessage,
        state: &mut RunState,
    ) -> Result<(), SkipReason> {
        let links = extract_links(&message.text);
        classify(message, &links, &self.policy, Utc::now())?;

        let first = links.first().ok_or(SkipReason::NoLink)?;
        let resolved = self.redirects.resolve(first).await;

        if let Some(id) = &resolved.product_id {
            if state.handled_ids.contains(id) || state.history_ids.contains(id) {
                return Err(SkipReason::Duplicate);
            }
        }

        let affiliate_link = self
            .affiliates
            .resolve(&resolved.normalized_url)
            .await
            .map_err(|e| {
                tracing::warn!(
                    url = %resolved.normalized_url,
                    error = %e,
                    "affiliate resolution failed"
                );
                SkipReason::AffiliateResolutionFailed
            })?;

        let hints = parse_hints(&message.text);
        let post = self
            .rewriter
            .compose(
                &message.text,
                &hints,
                &affiliate_link,
                resolved.product_id.as_deref(),
            )
            .await;

        if self.config.dry_run {
            tracing::info!(
                channel = %self.config.target_channel,
                body = %post.body,
                "dry-run: would publish"
            );
        } else {
            self.gateway
                .publish(&self.config.target_channel, &post.body)
                .await
                .map_err(|e| {
                    tracing::error!(
                        channel = %self.config.target_channel,
                        error = %e,
                        "publish failed"
                    );
                    SkipReason::PublishFailed
                })?;
            tracing::info!(
                product_id = post.product_id.as_deref().unwrap_or("none"),
                "deal published"
            );
        }

        if let Some(id) = post.product_id {
            state.handled_ids.insert(id);
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "controller_test.rs"]
mod tests;
