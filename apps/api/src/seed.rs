//! Mock collections loaded at startup. There is no persistence: every process
//! starts from these rows.

use chrono::{DateTime, NaiveDate, Utc};

use crate::models::application::Answer;
use crate::models::exam::ExamStatus;
use crate::models::job::Salary;
use crate::models::user::{UserKind, UserStatus};
use crate::models::{Application, ApplicationStatus, Decision, ExamResult, Job, JobStatus, User};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap_or_default()
}

fn timestamp(raw: &str) -> DateTime<Utc> {
    DateTime::parse_from_rfc3339(raw)
        .map(|t| t.with_timezone(&Utc))
        .unwrap_or_default()
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

fn answers(why: &str, strengths: &str) -> Vec<Answer> {
    vec![
        Answer {
            question: "Why do you want to work here?".to_string(),
            answer: why.to_string(),
        },
        Answer {
            question: "What are your strengths?".to_string(),
            answer: strengths.to_string(),
        },
    ]
}

pub fn jobs() -> Vec<Job> {
    let job = |id: &str,
               title: &str,
               department: &str,
               status: JobStatus,
               location: &str,
               salary: (u32, u32),
               application_count: u32,
               created: NaiveDate,
               published: Option<NaiveDate>,
               deadline: Option<NaiveDate>| Job {
        id: id.to_string(),
        title: title.to_string(),
        department: department.to_string(),
        status,
        job_type: "Full-time".to_string(),
        location: location.to_string(),
        salary: Salary {
            min: salary.0,
            max: salary.1,
            currency: "USD".to_string(),
        },
        description: String::new(),
        application_count,
        created_date: created,
        published_date: published,
        deadline,
    };

    let mut jobs = vec![
        job(
            "JOB-001",
            "Senior Frontend Developer",
            "Engineering",
            JobStatus::Published,
            "Remote",
            (80_000, 120_000),
            45,
            date(2024, 1, 15),
            Some(date(2024, 1, 16)),
            Some(date(2024, 2, 15)),
        ),
        job(
            "JOB-002",
            "Product Manager",
            "Product",
            JobStatus::Draft,
            "Office",
            (90_000, 130_000),
            0,
            date(2024, 1, 18),
            None,
            None,
        ),
        job(
            "JOB-003",
            "UX Designer",
            "Design",
            JobStatus::Closed,
            "Hybrid",
            (70_000, 100_000),
            32,
            date(2024, 1, 10),
            Some(date(2024, 1, 11)),
            Some(date(2024, 1, 31)),
        ),
        job(
            "JOB-004",
            "Backend Engineer",
            "Engineering",
            JobStatus::Draft,
            "Remote",
            (85_000, 125_000),
            0,
            date(2024, 1, 20),
            None,
            None,
        ),
    ];
    jobs[0].description = "Build, maintain, and optimize scalable web apps.".to_string();
    jobs
}

/// Title of a seeded job, or an em dash placeholder for unknown ids.
pub fn job_title(jobs: &[Job], job_id: &str) -> String {
    jobs.iter()
        .find(|j| j.id == job_id)
        .map(|j| j.title.clone())
        .unwrap_or_else(|| "—".to_string())
}

/// Six applications: three new, two shortlisted, one rejected.
pub fn applications() -> Vec<Application> {
    let jobs = jobs();
    let app = |id: &str,
               name: &str,
               email: &str,
               job_id: &str,
               status: ApplicationStatus,
               applied: NaiveDate,
               summary: &str,
               answers: Vec<Answer>,
               fit_score: Option<u32>,
               reasons: &[&str]| Application {
        id: id.to_string(),
        name: name.to_string(),
        email: email.to_string(),
        applied_job_id: job_id.to_string(),
        job_title: job_title(&jobs, job_id),
        status,
        applied_date: applied,
        resume_summary: summary.to_string(),
        answers,
        fit_score,
        ai_reasons: strings(reasons),
        screened: fit_score.is_some(),
    };

    vec![
        app(
            "1",
            "Alex Johnson",
            "alex.johnson@example.com",
            "JOB-001",
            ApplicationStatus::New,
            date(2024, 1, 20),
            "Experienced frontend developer with 5+ years in React",
            answers(
                "I admire your company's mission",
                "Problem-solving and teamwork",
            ),
            None,
            &[],
        ),
        app(
            "2",
            "Sarah Williams",
            "sarah.w@example.com",
            "JOB-002",
            ApplicationStatus::New,
            date(2024, 1, 19),
            "Product manager with startup experience",
            answers(
                "I want to build products that matter",
                "Strategic thinking and user empathy",
            ),
            None,
            &[],
        ),
        app(
            "3",
            "Michael Chen",
            "michael.chen@example.com",
            "JOB-003",
            ApplicationStatus::Shortlisted,
            date(2024, 1, 18),
            "UX designer with background in psychology",
            answers(
                "I respect your design-first approach",
                "User research and prototyping",
            ),
            Some(85),
            &["Strong portfolio", "Relevant experience", "Good cultural fit"],
        ),
        app(
            "4",
            "Priya Patel",
            "priya.patel@example.com",
            "JOB-004",
            ApplicationStatus::Shortlisted,
            date(2024, 1, 21),
            "Backend engineer focused on distributed systems",
            answers(
                "Your platform problems are interesting",
                "API design and reliability",
            ),
            Some(88),
            &["Matches required skills", "Relevant experience level"],
        ),
        app(
            "5",
            "Daniel Kim",
            "daniel.kim@example.com",
            "JOB-002",
            ApplicationStatus::Rejected,
            date(2024, 1, 17),
            "Business analyst moving into product",
            answers("Career growth", "Data analysis"),
            Some(62),
            &["Missing specific required skill", "Limited domain depth"],
        ),
        app(
            "6",
            "Emma Davis",
            "emma.davis@example.com",
            "JOB-004",
            ApplicationStatus::New,
            date(2024, 1, 22),
            "Junior developer with Go and PostgreSQL experience",
            answers("I like your engineering blog", "Fast learner"),
            None,
            &[],
        ),
    ]
}

pub fn exam_results() -> Vec<ExamResult> {
    let result = |id: &str,
                  name: &str,
                  email: &str,
                  exam: &str,
                  job_role: &str,
                  track: &str,
                  score: u32,
                  status: ExamStatus,
                  submitted_at: &str,
                  strengths: &[&str],
                  weaknesses: &[&str],
                  recommendation: &str| ExamResult {
        id: id.to_string(),
        name: name.to_string(),
        email: email.to_string(),
        exam: exam.to_string(),
        job_role: job_role.to_string(),
        track: track.to_string(),
        score,
        max_score: 100,
        percentage: score,
        status,
        decision: Decision::Undecided,
        submitted_at: timestamp(submitted_at),
        strengths: strings(strengths),
        weaknesses: strings(weaknesses),
        recommendation: recommendation.to_string(),
    };

    vec![
        result(
            "1",
            "Alice Johnson",
            "alice@mail.com",
            "Frontend Coding Challenge",
            "Frontend Developer",
            "frontend",
            85,
            ExamStatus::Passed,
            "2025-01-20T14:30:00Z",
            &["React", "JavaScript", "Problem Solving"],
            &["CSS", "Time Management"],
            "Strong candidate - Recommend for technical interview",
        ),
        result(
            "2",
            "Bob Smith",
            "bob@mail.com",
            "Frontend Coding Challenge",
            "Frontend Developer",
            "frontend",
            72,
            ExamStatus::Passed,
            "2025-01-20T15:45:00Z",
            &["JavaScript", "Debugging"],
            &["React Hooks", "CSS Layout"],
            "Good fundamentals - Consider for junior role",
        ),
        result(
            "3",
            "Carol Williams",
            "carol@mail.com",
            "Backend System Design",
            "Backend Engineer",
            "backend",
            45,
            ExamStatus::Failed,
            "2025-01-19T11:20:00Z",
            &["Basic Concepts"],
            &["System Design", "Scalability", "Security"],
            "Needs improvement - Consider re-evaluation after training",
        ),
        result(
            "4",
            "David Brown",
            "david@mail.com",
            "Fullstack Assessment",
            "Fullstack Developer",
            "fullstack",
            92,
            ExamStatus::Passed,
            "2025-01-18T09:10:00Z",
            &["Frontend", "Backend", "Testing"],
            &["Documentation"],
            "Excellent - Fast-track to final interview",
        ),
        result(
            "5",
            "Eva Martinez",
            "eva@mail.com",
            "DevOps Fundamentals",
            "DevOps Engineer",
            "devops",
            0,
            ExamStatus::Pending,
            "2025-01-21T16:00:00Z",
            &[],
            &[],
            "Awaiting grading",
        ),
    ]
}

/// Platform accounts: four job seekers and four recruiters.
pub fn users() -> Vec<User> {
    let seeker = |id: &str,
                  name: &str,
                  email: &str,
                  location: &str,
                  status: UserStatus,
                  joined: NaiveDate,
                  skills: &[&str],
                  applied_jobs: u32| User {
        id: id.to_string(),
        name: name.to_string(),
        email: email.to_string(),
        kind: UserKind::JobSeeker,
        company: None,
        location: location.to_string(),
        status,
        joined,
        skills: strings(skills),
        applied_jobs,
        posted_jobs: 0,
        hires: 0,
    };
    let recruiter = |id: &str,
                     name: &str,
                     email: &str,
                     company: &str,
                     location: &str,
                     status: UserStatus,
                     joined: NaiveDate,
                     posted_jobs: u32,
                     hires: u32| User {
        id: id.to_string(),
        name: name.to_string(),
        email: email.to_string(),
        kind: UserKind::Recruiter,
        company: Some(company.to_string()),
        location: location.to_string(),
        status,
        joined,
        skills: Vec::new(),
        applied_jobs: 0,
        posted_jobs,
        hires,
    };

    vec![
        seeker(
            "JS-1",
            "Alice Johnson",
            "alice.johnson@example.com",
            "New York, USA",
            UserStatus::Active,
            date(2024, 1, 15),
            &["React", "JavaScript", "Node.js"],
            12,
        ),
        seeker(
            "JS-2",
            "Bob Smith",
            "bob.smith@example.com",
            "London, UK",
            UserStatus::Active,
            date(2024, 2, 20),
            &["Python", "Django", "PostgreSQL"],
            8,
        ),
        seeker(
            "JS-3",
            "Carol Williams",
            "carol.williams@example.com",
            "Toronto, Canada",
            UserStatus::Inactive,
            date(2024, 1, 5),
            &["UI/UX Design", "Figma", "Adobe XD"],
            5,
        ),
        seeker(
            "JS-4",
            "David Brown",
            "david.brown@example.com",
            "Sydney, Australia",
            UserStatus::Active,
            date(2024, 3, 10),
            &["Java", "Spring Boot", "MySQL"],
            15,
        ),
        recruiter(
            "RC-1",
            "Emma Wilson",
            "emma.wilson@company.com",
            "Tech Innovations Inc.",
            "San Francisco, USA",
            UserStatus::Active,
            date(2023, 11, 15),
            8,
            24,
        ),
        recruiter(
            "RC-2",
            "Michael Chen",
            "michael.chen@company.com",
            "Data Solutions Ltd.",
            "Berlin, Germany",
            UserStatus::Active,
            date(2024, 1, 22),
            5,
            12,
        ),
        recruiter(
            "RC-3",
            "Sophia Rodriguez",
            "sophia.rodriguez@company.com",
            "Creative Minds Agency",
            "Madrid, Spain",
            UserStatus::Pending,
            date(2024, 3, 5),
            0,
            0,
        ),
        recruiter(
            "RC-4",
            "James Taylor",
            "james.taylor@company.com",
            "Global Enterprises",
            "Chicago, USA",
            UserStatus::Suspended,
            date(2023, 9, 18),
            12,
            18,
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_application_mix() {
        let apps = applications();
        assert_eq!(apps.len(), 6);
        let count = |s: ApplicationStatus| apps.iter().filter(|a| a.status == s).count();
        assert_eq!(count(ApplicationStatus::New), 3);
        assert_eq!(count(ApplicationStatus::Shortlisted), 2);
        assert_eq!(count(ApplicationStatus::Rejected), 1);
    }

    #[test]
    fn test_job_titles_resolved() {
        let apps = applications();
        assert_eq!(apps[0].job_title, "Senior Frontend Developer");
        assert_eq!(job_title(&jobs(), "JOB-999"), "—");
    }

    #[test]
    fn test_seed_ids_unique() {
        let apps = applications();
        let mut ids: Vec<&str> = apps.iter().map(|a| a.id.as_str()).collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), apps.len());
    }

    #[test]
    fn test_user_mix() {
        let users = users();
        assert_eq!(users.len(), 8);
        let recruiters = users.iter().filter(|u| u.kind == UserKind::Recruiter);
        assert!(recruiters.clone().all(|u| u.company.is_some()));
        assert_eq!(recruiters.count(), 4);
        let active = users.iter().filter(|u| u.status == UserStatus::Active).count();
        assert_eq!(active, 5);
    }
}
