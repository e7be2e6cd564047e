//! Embedded training corpus.
//!
//! Five genuine resumes and five obviously fabricated ones. The texts are
//! fixed; training on them is reproducible.

use serde::{Deserialize, Serialize};

/// Ground-truth label of a resume.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Label {
    Real,
    Fake,
}

impl Label {
    /// Numeric class used by the estimators: real = 0, fake = 1.
    pub fn as_class(self) -> u8 {
        match self {
            Label::Real => 0,
            Label::Fake => 1,
        }
    }
}

/// A resume text with its label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabeledSample {
    pub text: String,
    pub label: Label,
}

pub const REAL_RESUMES: [&str; 5] = [
    "
    John Smith
    Email: john.smith@email.com | Phone: +1-555-0101

    EDUCATION:
    B.Tech in Computer Science, IIT Delhi (2018)
    M.Tech in Artificial Intelligence, IIT Bombay (2020)

    EXPERIENCE:
    Senior Software Engineer, Google (2022 - Present, 2 years)
    Software Engineer, Microsoft (2020 - 2022, 2 years)
    Junior Developer, TCS (2018 - 2020, 2 years)

    SKILLS: Python, Java, Machine Learning, TensorFlow, Kubernetes
    ",
    "
    Alice Johnson
    Email: alice@company.com | Phone: +1-555-0102

    EDUCATION:
    Bachelor of Science, Stanford University (2019)

    EXPERIENCE:
    Data Scientist, Amazon (2021 - Present, 3 years)
    Data Analyst, Deloitte (2019 - 2021, 2 years)

    SKILLS: Python, SQL, Data Analysis, Machine Learning, Tableau
    ",
    "
    Bob Wilson
    Email: bob.wilson@email.com | Phone: +1-555-0103

    EDUCATION:
    B.Tech in Information Technology, Delhi University (2017)

    EXPERIENCE:
    Full Stack Developer, Flipkart (2020 - Present, 4 years)
    Frontend Developer, Accenture (2017 - 2020, 3 years)

    SKILLS: JavaScript, React, Node.js, MongoDB, Express
    ",
    "
    Sarah Davis
    Email: sarah.davis@email.com | Phone: +1-555-0104

    EDUCATION:
    Master of Science, MIT (2018)
    Bachelor of Engineering, Berkeley (2016)

    EXPERIENCE:
    Solutions Architect, IBM (2019 - Present, 5 years)
    Systems Engineer, Cisco (2018 - 2019, 1 year)

    SKILLS: Cloud Architecture, AWS, Docker, System Design
    ",
    "
    Michael Brown
    Email: michael@tech.com | Phone: +1-555-0105

    EDUCATION:
    B.Tech, IIT Kharagpur (2020)

    EXPERIENCE:
    DevOps Engineer, Uber (2021 - Present, 3 years)
    Operations Engineer, Zoho (2020 - 2021, 1 year)

    SKILLS: DevOps, CI/CD, Jenkins, Docker, Kubernetes
    ",
];

pub const FAKE_RESUMES: [&str; 5] = [
    "
    Super Developer X
    Email: superhacker@fake.com | Phone: 999-999-9999

    EDUCATION:
    PhD in Everything from Fake University (2015)
    Master's in Unicorn Startup Management (2013)

    EXPERIENCE:
    Expert in Telekinesis Programming, Time Travel Corp (50 years)
    Guru Ninja 10x Developer, Imaginary Company (100 years)

    SKILLS: Time Travel, Telepathy Programming, Mind Reading, Expert in Everything,
    Knows All Programming Languages, Telekinetic Debugging, Artificial General Intelligence
    ",
    "
    Fake Resume
    Email: lorem@ipsum.com

    EDUCATION:
    Lorem Ipsum University (2020)

    EXPERIENCE:
    Lorem Ipsum Company (15 years)
    Dummy Text Industries (10 years)

    SKILLS: Placeholder Skills, Filler Expertise, Dummy Competencies
    ",
    "
    Expert in Everything
    Phone: 000-0000

    EDUCATION:
    Started at age 5 with PhD

    EXPERIENCE:
    Working since age 8 with 60 years of experience

    SKILLS: Rockstar Engineer, Expert in Quantum Computing, Consciousness Transfer
    ",
    "
    John Fake
    Contact: unknown@unknown.com

    EDUCATION:
    Unknown University (2025)

    EXPERIENCE:
    Worked 200% time at multiple companies

    SKILLS: X-ray Vision, Mind Control Programming, Unicorn Startup Creator
    ",
    "
    Bot McSpammer

    EDUCATION:
    Dummy University (2030)

    EXPERIENCE:
    Experience since age 3
    Worked 150 years in tech

    SKILLS: Telekinesis, Time Management 200%, Artificial General Intelligence
    ",
];

/// The labeled corpus: all real resumes first, then all fake ones.
pub fn sample_corpus() -> Vec<LabeledSample> {
    REAL_RESUMES
        .iter()
        .map(|text| (text, Label::Real))
        .chain(FAKE_RESUMES.iter().map(|text| (text, Label::Fake)))
        .map(|(text, label)| LabeledSample {
            text: text.to_string(),
            label,
        })
        .collect()
}

/// Number of samples carrying `label`.
pub fn count_label(samples: &[LabeledSample], label: Label) -> usize {
    samples.iter().filter(|s| s.label == label).count()
}
