//! Plain-text analysis of a job search: a one-line summary, the `---`
//! separator, then the detailed listing with a pitch and next steps.

use crate::agents::output::SECTION_SEPARATOR;
use crate::jobs::boards::JobPosting;

/// Optional profile links that change the next-steps advice.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProfileLinks<'a> {
    pub linkedin: Option<&'a str>,
    pub github: Option<&'a str>,
    pub portfolio: Option<&'a str>,
}

pub fn summary_line(jobs: &[JobPosting], platform: Option<&str>) -> String {
    let scope = platform.unwrap_or("multiple job boards");
    match jobs.first() {
        Some(top) => format!(
            "I found {} relevant job opportunities across {}. The top match has a {}% match with your profile.",
            jobs.len(),
            scope,
            top.match_percentage
        ),
        None => format!(
            "I found no job opportunities across {scope}. Try broader keywords or another location."
        ),
    }
}

fn posting_block(job: &JobPosting) -> String {
    format!(
        "- {} at {}\n  Location: {}\n  Source: {}\n  Match: {}%\n  Contact: {}\n  URL: {}",
        job.title,
        job.company,
        job.location,
        job.source,
        job.match_percentage,
        job.contact_info.as_deref().unwrap_or("Not available"),
        job.url
    )
}

fn present(link: Option<&str>) -> bool {
    link.is_some_and(|l| !l.trim().is_empty())
}

pub fn build_analysis(
    jobs: &[JobPosting],
    platform: Option<&str>,
    keywords: &str,
    job_type: Option<&str>,
    links: ProfileLinks<'_>,
) -> String {
    let listing = jobs
        .iter()
        .map(posting_block)
        .collect::<Vec<_>>()
        .join("\n\n");

    let linkedin_step = if present(links.linkedin) {
        "5. Ensure your LinkedIn profile is up to date"
    } else {
        "5. Consider creating a LinkedIn profile"
    };
    let github_step = if present(links.github) {
        "6. Highlight relevant projects on your GitHub"
    } else {
        "6. Consider showcasing your code on GitHub"
    };
    let portfolio_step = if present(links.portfolio) {
        "7. Update your portfolio with recent work"
    } else {
        "7. Consider creating a portfolio to showcase your work"
    };

    let details = format!(
        "Job Opportunities:\n\n{listing}\n\n\
        Elevator Pitch:\n\
        Based on the job requirements and your profile, here's a suggested elevator pitch:\n\
        \"I am a skilled professional with experience in {keywords}. I am particularly interested in {job_type} roles and have a track record of success in delivering high-quality results.\"\n\n\
        Next Steps to Improve Application Success:\n\
        1. Customize your resume for each application, highlighting relevant skills\n\
        2. Follow up with the provided contact information within 48 hours\n\
        3. Research each company thoroughly before applying\n\
        4. Prepare specific examples of your work that align with job requirements\n\
        {linkedin_step}\n{github_step}\n{portfolio_step}",
        keywords = keywords.trim(),
        job_type = job_type.map(str::trim).filter(|t| !t.is_empty()).unwrap_or("various"),
    );

    format!(
        "{}\n{}\n{}",
        summary_line(jobs, platform),
        SECTION_SEPARATOR,
        details
    )
}
