use rand::Rng;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Question {
    pub question: String,
    pub answer: String,
    pub category: String,
}

impl Question {
    pub fn new(question: &str, answer: &str, category: &str) -> Self {
        Self {
            question: question.to_string(),
            answer: answer.to_string(),
            category: category.to_string(),
        }
    }
}

#[derive(Debug, thiserror::Error)]
#[error("question bank must contain at least one question")]
pub struct EmptyQuestionBank;

/// Categorized prompt/answer pairs a round draws from
#[derive(Debug, Clone)]
pub struct QuestionBank {
    questions: Vec<Question>,
}

impl QuestionBank {
    pub fn new(questions: Vec<Question>) -> Result<Self, EmptyQuestionBank> {
        if questions.is_empty() {
            return Err(EmptyQuestionBank);
        }
        Ok(Self { questions })
    }

    /// The built-in technical question set
    pub fn technical() -> Self {
        let questions = TECHNICAL_QUESTIONS
            .iter()
            .map(|(question, answer, category)| Question::new(question, answer, category))
            .collect();
        Self { questions }
    }

    /// Uniformly random entry
    pub fn draw<R: Rng + ?Sized>(&self, rng: &mut R) -> &Question {
        let index = rng.random_range(0..self.questions.len());
        &self.questions[index]
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    pub fn categories(&self) -> Vec<&str> {
        let mut categories: Vec<&str> = self.questions.iter().map(|q| q.category.as_str()).collect();
        categories.sort_unstable();
        categories.dedup();
        categories
    }
}

impl Default for QuestionBank {
    fn default() -> Self {
        Self::technical()
    }
}

const TECHNICAL_QUESTIONS: &[(&str, &str, &str)] = &[
    ("The first node of a tree data structure is called", "root", "Data Structures"),
    ("What keyword is used to define a constant variable in Java?", "final", "Java"),
    ("Which data structure follows LIFO principle?", "stack", "Data Structures"),
    ("What does API stand for in programming?", "Application Programming Interface", "Programming"),
    ("Which loop is guaranteed to execute at least once in Java?", "do-while", "Java"),
    ("In C++, what operator is used for dynamic memory allocation?", "new", "C++"),
    ("What is the extension for C++ header files?", ".h", "C++"),
    ("Which keyword is used for function templates in C++?", "template", "C++"),
    ("What does STL stand for in C++?", "Standard Template Library", "C++"),
    ("Which operator is used for scope resolution in C++?", "::", "C++"),
    ("What is the parent class of all Java classes?", "Object", "Java"),
    ("Which keyword is used to implement inheritance in Java?", "extends", "Java"),
    ("What is the default value of a boolean variable in Java?", "false", "Java"),
    ("Which interface is used for collections that maintain order?", "List", "Java"),
    ("What annotation is used to override a method in Java?", "@Override", "Java"),
    ("Which keyword is used to define a function in Python?", "def", "Python"),
    ("What is used to create virtual environments in Python?", "venv", "Python"),
    ("Which data type is used for immutable sequences in Python?", "tuple", "Python"),
    ("What does PEP stand for in Python?", "Python Enhancement Proposal", "Python"),
    ("Which operator is used for exponentiation in Python?", "**", "Python"),
    ("Which clause is used to filter records in SQL?", "WHERE", "Database"),
    ("What is the keyword to remove duplicate rows in SQL?", "DISTINCT", "Database"),
    ("Which join returns all records when there is a match in either table?", "FULL OUTER JOIN", "Database"),
    ("What does DDL stand for in database management?", "Data Definition Language", "Database"),
    ("Which constraint ensures all values in a column are unique?", "UNIQUE", "Database"),
    ("The component that exhales heat from a computer is called", "cooler", "Hardware"),
    ("What does CPU stand for?", "Central Processing Unit", "Hardware"),
    ("Which type of memory is volatile?", "RAM", "Hardware"),
    ("What connects the processor to the main memory?", "bus", "Hardware"),
    ("Which port is commonly used for external hard drives?", "USB", "Hardware"),
    ("What does CSS stand for?", "Cascading Style Sheets", "Web"),
    ("Which HTML tag is used for the largest heading?", "h1", "Web"),
    ("What language runs in web browsers?", "JavaScript", "Web"),
    ("Which method converts JSON string to object?", "JSON.parse", "Web"),
    ("What does DOM stand for?", "Document Object Model", "Web"),
];
