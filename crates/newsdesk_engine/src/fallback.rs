use chrono::{DateTime, Duration, Utc};
use newsdesk_core::{Article, Category, SourceInfo};

use crate::normalize::next_article_id;
use crate::published::render_age;

struct DemoRecord {
    title: &'static str,
    description: &'static str,
    content: &'static str,
    source_name: &'static str,
    source_url: &'static str,
    image: &'static str,
    hours_ago: i64,
    category: Category,
}

const DEMO_RECORDS: [DemoRecord; 9] = [
    DemoRecord {
        title: "OpenAI Unveils GPT-5: Next Generation AI Model",
        description: "OpenAI announces GPT-5 with significant improvements in reasoning and multimodal capabilities, pushing the boundaries of artificial intelligence.",
        content: "The new model demonstrates unprecedented performance in complex reasoning tasks and shows improved safety features.",
        source_name: "TechCrunch",
        source_url: "https://techcrunch.com",
        image: "https://images.unsplash.com/photo-1677442136019-21780ecad995?auto=format&fit=crop&w=800",
        hours_ago: 2,
        category: Category::Ai,
    },
    DemoRecord {
        title: "Boston Dynamics Announces New Atlas Robot with AI Integration",
        description: "The latest humanoid robot features advanced AI for autonomous decision-making and complex task execution in industrial environments.",
        content: "Atlas now features enhanced mobility and can perform complex manipulation tasks in unstructured environments.",
        source_name: "Wired",
        source_url: "https://wired.com",
        image: "https://images.unsplash.com/photo-1678931561580-7dcc8f7e5b3a?auto=format&fit=crop&w=800",
        hours_ago: 5,
        category: Category::Robotics,
    },
    DemoRecord {
        title: "Quantum Computing Breakthrough Achieves 1000 Qubits",
        description: "Researchers achieve a major milestone in quantum computing, bringing practical quantum applications closer to reality.",
        content: "The breakthrough reduces error rates significantly, making quantum computing more viable for real-world applications.",
        source_name: "Nature",
        source_url: "https://nature.com",
        image: "https://images.unsplash.com/photo-1635070041078-e363dbe005cb?auto=format&fit=crop&w=800",
        hours_ago: 24,
        category: Category::Quantum,
    },
    DemoRecord {
        title: "Neuralink's First Human Trial Shows Promising Results",
        description: "Initial results from Neuralink's brain-computer interface trial demonstrate successful neural signal transmission and decoding.",
        content: "Patients with paralysis were able to control digital devices using only their thoughts.",
        source_name: "The Verge",
        source_url: "https://theverge.com",
        image: "https://images.unsplash.com/photo-1555255707-c07966088b7b?auto=format&fit=crop&w=800",
        hours_ago: 12,
        category: Category::Ai,
    },
    DemoRecord {
        title: "Autonomous Delivery Robots Approved for Citywide Deployment",
        description: "Major city approves expansion of autonomous delivery robots, revolutionizing last-mile logistics and reducing traffic congestion.",
        content: "The robots can navigate sidewalks and crosswalks safely, delivering packages within 30 minutes.",
        source_name: "Forbes",
        source_url: "https://forbes.com",
        image: "https://images.unsplash.com/photo-1544319733-053e92c8d5a0?auto=format&fit=crop&w=800",
        hours_ago: 8,
        category: Category::Robotics,
    },
    DemoRecord {
        title: "New AI Algorithm Can Predict Protein Folding in Minutes",
        description: "Breakthrough in computational biology allows AI to predict protein structures with unprecedented speed and accuracy.",
        content: "This advancement could accelerate drug discovery and understanding of genetic diseases.",
        source_name: "Science Journal",
        source_url: "https://science.org",
        image: "https://images.unsplash.com/photo-1558618666-fcd25c85cd64?auto=format&fit=crop&w=800",
        hours_ago: 36,
        category: Category::Ai,
    },
    DemoRecord {
        title: "Cybersecurity Firm Discovers Critical Zero-Day Vulnerability",
        description: "Major security flaw discovered in widely used enterprise software, affecting millions of systems worldwide.",
        content: "The vulnerability allows remote code execution and requires immediate patching.",
        source_name: "Security Weekly",
        source_url: "https://securityweekly.com",
        image: "https://images.unsplash.com/photo-1550751827-4bd374c3f58b?auto=format&fit=crop&w=800",
        hours_ago: 6,
        category: Category::Cybersecurity,
    },
    DemoRecord {
        title: "Tesla Unveils Next-Generation Humanoid Robot Prototype",
        description: "Tesla's Optimus robot demonstrates new capabilities including object manipulation and environmental navigation.",
        content: "The robot can now perform complex manufacturing tasks with human-like dexterity.",
        source_name: "Tesla Blog",
        source_url: "https://tesla.com",
        image: "https://images.unsplash.com/photo-1485827404703-89b55fcc595e?auto=format&fit=crop&w=800",
        hours_ago: 18,
        category: Category::Robotics,
    },
    DemoRecord {
        title: "Major Tech Companies Form AI Ethics Consortium",
        description: "Leading tech companies establish consortium to develop ethical guidelines for AI development and deployment.",
        content: "The consortium aims to address bias, transparency, and accountability in AI systems.",
        source_name: "Tech Ethics Review",
        source_url: "https://techethics.org",
        image: "https://images.unsplash.com/photo-1551288049-bebda4e38f71?auto=format&fit=crop&w=800",
        hours_ago: 48,
        category: Category::Ai,
    },
];

/// Fixed demo set used whenever live data is unavailable. Categories are
/// curated rather than computed; each call hands out fresh ids.
pub fn fallback_articles(now: DateTime<Utc>) -> Vec<Article> {
    DEMO_RECORDS
        .iter()
        .map(|record| Article {
            id: next_article_id(),
            title: record.title.to_string(),
            description: record.description.to_string(),
            content: record.content.to_string(),
            url: record.source_url.to_string(),
            image: Some(record.image.to_string()),
            source: SourceInfo {
                name: record.source_name.to_string(),
                url: record.source_url.to_string(),
            },
            category: record.category,
            published_at: render_age(now - Duration::hours(record.hours_ago), now),
        })
        .collect()
}
