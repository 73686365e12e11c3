// Prompt constants for cover-letter generation.

/// Placeholder used for any profile field the candidate left empty.
pub const NOT_SPECIFIED: &str = "Not specified";

/// Cover letter prompt template.
/// Replace: {name}, {email}, {phone}, {current_role}, {years_of_experience},
///          {skills}, {experience}, {projects}, {education}, {job_description}
pub const COVER_LETTER_PROMPT_TEMPLATE: &str = r#"Generate a professional cover letter for the following candidate applying to this job:

Candidate Information:
- Name: {name}
- Email: {email}
- Phone: {phone}
- Current Role: {current_role}
- Years of Experience: {years_of_experience}

Key Skills: {skills}

Work Experience Summary:
{experience}

Projects Summary:
{projects}

Education: {education}

Job Description:
{job_description}

Please generate a compelling, professional cover letter that:
1. Addresses the hiring manager professionally
2. Explains why the candidate is interested in this specific role
3. Highlights relevant experience, skills and projects that match the job requirements
4. Shows enthusiasm and fit for the company
5. Ends with a call to action for an interview
6. Is between 300-500 words
7. Uses a professional tone throughout

Format the response as a proper cover letter with paragraphs and professional formatting."#;
