//! Plain-text rendering of the blog pages.

use std::io::{self, Write};

use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::application::dto::{
    AuthorProfile, AuthorSummary, FeedCard, HomeFeed, PostDetail, ProfileTab,
};
use crate::domain::entities::{ImageHandle, LoadStatus};
use crate::presentation::binding::PreloadProgress;

const FEATURED_EXCERPT_WIDTH: usize = 96;
const CARD_EXCERPT_WIDTH: usize = 72;
const ELLIPSIS: char = '…';

/// Shortens `text` to at most `max_width` display columns.
#[must_use]
pub fn truncate(text: &str, max_width: usize) -> String {
    if text.width() <= max_width {
        return text.to_string();
    }
    if max_width == 0 {
        return String::new();
    }

    let budget = max_width - 1;
    let mut width = 0;
    let mut out = String::new();
    for ch in text.chars() {
        let w = ch.width().unwrap_or(0);
        if width + w > budget {
            break;
        }
        width += w;
        out.push(ch);
    }
    let mut out = out.trim_end().to_string();
    out.push(ELLIPSIS);
    out
}

fn underline(out: &mut impl Write, title: &str) -> io::Result<()> {
    writeln!(out, "{title}")?;
    writeln!(out, "{}", "=".repeat(title.width()))
}

fn render_card(out: &mut impl Write, card: &FeedCard, excerpt_width: usize) -> io::Result<()> {
    writeln!(out, "[{}] {}", card.post.id, card.post.title)?;
    writeln!(out, "    by {}", card.author_name)?;
    if let Some(avatar) = &card.author_avatar {
        writeln!(out, "    avatar: {avatar}")?;
    }
    writeln!(
        out,
        "    {}",
        truncate(&card.post.flat_body(), excerpt_width)
    )?;
    writeln!(out, "    image: {}", card.image_url)
}

/// Featured post, one page of cards and a pointer to the next page.
pub fn render_home(out: &mut impl Write, feed: &HomeFeed) -> io::Result<()> {
    let Some(featured) = &feed.featured else {
        return writeln!(out, "No posts yet.");
    };

    underline(out, "Featured")?;
    render_card(out, featured, FEATURED_EXCERPT_WIDTH)?;
    writeln!(out)?;

    underline(
        out,
        &format!("Latest posts (page {} of {})", feed.page, feed.total_pages),
    )?;
    for card in &feed.cards {
        render_card(out, card, CARD_EXCERPT_WIDTH)?;
    }

    if feed.has_next_page() {
        writeln!(out)?;
        writeln!(out, "More: blogview home --page {}", feed.page + 1)?;
    }
    Ok(())
}

/// Post body with its author and comments.
pub fn render_post(out: &mut impl Write, detail: &PostDetail) -> io::Result<()> {
    underline(out, &detail.post.title)?;
    writeln!(
        out,
        "by {} ({})",
        detail.author.name,
        detail.author.handle()
    )?;
    writeln!(out, "avatar: {}", detail.author_avatar)?;
    writeln!(out)?;
    for paragraph in detail.post.paragraphs() {
        writeln!(out, "{paragraph}")?;
    }
    writeln!(out)?;

    underline(out, &format!("Comments ({})", detail.comments.len()))?;
    for view in &detail.comments {
        writeln!(out, "{} <{}>", view.comment.name, view.comment.email)?;
        writeln!(out, "    avatar: {}", view.avatar_url)?;
        writeln!(out, "    {}", view.comment.body.replace('\n', " "))?;
    }
    Ok(())
}

/// One status line for an image shown by a page.
pub fn render_image_status(
    out: &mut impl Write,
    label: &str,
    url: &str,
    status: LoadStatus,
    image: Option<&ImageHandle>,
) -> io::Result<()> {
    match image {
        Some(handle) => writeln!(
            out,
            "{label}: {status} {}x{} ({url})",
            handle.width(),
            handle.height()
        ),
        None => writeln!(out, "{label}: {status} ({url})"),
    }
}

/// Author directory, one aligned row per author.
pub fn render_authors(out: &mut impl Write, authors: &[AuthorSummary]) -> io::Result<()> {
    underline(out, &format!("Authors ({})", authors.len()))?;
    let name_width = authors
        .iter()
        .map(|a| a.user.name.width())
        .max()
        .unwrap_or(0);

    for author in authors {
        let padding = name_width - author.user.name.width();
        writeln!(
            out,
            "[{}] {}{}  {}  {} posts  {}",
            author.user.id,
            author.user.name,
            " ".repeat(padding),
            author.user.handle(),
            author.post_count,
            author.avatar_url
        )?;
    }
    Ok(())
}

/// Profile header followed by the selected tab.
pub fn render_profile(
    out: &mut impl Write,
    profile: &AuthorProfile,
    tab: ProfileTab,
) -> io::Result<()> {
    let user = &profile.user;
    underline(out, &format!("{} ({})", user.name, user.handle()))?;
    writeln!(out, "avatar: {}", profile.avatar_url)?;
    writeln!(out)?;

    match tab {
        ProfileTab::Info => {
            writeln!(out, "Email:   {}", user.email)?;
            if let Some(phone) = &user.phone {
                writeln!(out, "Phone:   {phone}")?;
            }
            if let Some(website) = &user.website {
                writeln!(out, "Website: {website}")?;
            }
            if let Some(address) = &user.address {
                writeln!(out, "Address: {address}")?;
            }
            if let Some(company) = &user.company {
                writeln!(out, "Company: {}", company.name)?;
                if !company.catch_phrase.is_empty() {
                    writeln!(out, "         \"{}\"", company.catch_phrase)?;
                }
            }
        }
        ProfileTab::Posts => {
            if profile.posts.is_empty() {
                return writeln!(out, "No posts yet.");
            }
            for entry in &profile.posts {
                writeln!(out, "[{}] {}", entry.post.id, entry.post.title)?;
                writeln!(
                    out,
                    "    {}",
                    truncate(&entry.post.flat_body(), CARD_EXCERPT_WIDTH)
                )?;
            }
        }
    }
    Ok(())
}

/// One progress line of an image warm-up.
pub fn render_progress(out: &mut impl Write, progress: PreloadProgress) -> io::Result<()> {
    writeln!(
        out,
        "Loading images... {} of {} ({}%)",
        progress.loaded,
        progress.total,
        progress.percent()
    )
}
